use log::info;
use rbset::{RBTree, Set};

const LOG_FILE: &str = "rbset_demo.log";

fn initialize_logging() {
    use simplelog::*;
    use std::fs::File;
    CombinedLogger::init(
        vec![
            TermLogger::new(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
            WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(LOG_FILE).expect("couldn't create the log file")),
        ]
    ).expect("a logger was already installed");
}

fn main() {
    initialize_logging();

    let mut tree = RBTree::new();
    let set: &mut dyn Set = &mut tree;

    for key in [50, 5, 100, 25, 30, 1, 200] {
        set.insert(key);
    }
    info!("Inserted 7 keys, size is {}", set.size());

    for key in [1, 5, 300] {
        info!("contains({key}) = {}", set.contains(key));
    }

    for key in [5, 50, 100, 1, 25, 30] {
        set.remove(key);
        info!("Removed {key}, size is {}", set.size());
    }

    set.remove(200);
    info!("Removed 200, empty: {}", set.is_empty());

    match tree.check_invariants() {
        Ok(()) => info!("Tree is still a valid red-black tree"),
        Err(e) => log::error!("Tree is broken: {e}"),
    }
}
