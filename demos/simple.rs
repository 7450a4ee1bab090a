use grid_pathviz::{AnimationEvent, Algorithm, ManualClock, Position, Session};

// In this example a path is found around a short wall and the finished visualization is printed.
// S marks the start, E the end, # obstacles, o considered cells and * the path.
fn main() {
    let mut session = Session::with_defaults(ManualClock::new()).unwrap();
    for row in 0..6 {
        session.set_obstacle(Position::new(row, 6), true).unwrap();
    }
    session.resize(20);
    println!("{}", session.grid());
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
        session.set_algorithm(algorithm);
        session.run().unwrap();
        let events = session.finish();
        println!("{:?}:\n{}", algorithm, session.grid());
        match events.last() {
            Some(AnimationEvent::PathFound(path)) => {
                println!("A path of {} cells has been found:", path.len());
                for p in path {
                    println!("{}", p);
                }
            }
            _ => println!("No path"),
        }
    }
}
