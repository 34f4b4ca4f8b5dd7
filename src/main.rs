use gridworld_util::grid::GridValue;
use gridworld_util::grid_setup::GridworldSetup;
use gridworld_util::settings::GridworldSettings;
use gridworld_util::util::counter::Counter;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Grid world setup starting up");

    let settings = GridworldSettings::from_env()?;
    let setup = GridworldSetup::new(&settings)?;
    let grid = setup.grid();

    let mut cells: Counter<&str, u32> = Counter::new();
    cells.increment_all(
        grid.grid().iter().flatten().map(|cell| match cell {
            GridValue::Empty => "empty",
            GridValue::Wall => "wall",
            GridValue::Start => "start",
            GridValue::Exit(_) => "exit",
        }),
        1,
    );
    for kind in cells.sorted_keys() {
        info!("{:>6}: {}", kind, cells.get(kind));
    }

    let mut rewards: Counter<String> = Counter::new();
    for exit in grid.exits() {
        if let Some(reward) = grid.exit_reward(exit) {
            rewards.set(format!("({}, {})", exit.x, exit.y), reward);
        }
    }
    if let Some(best) = rewards.arg_max() {
        info!("Best exit at {} pays {}", best, rewards.get(best));
    }

    info!(
        "{} states, living reward {}, noise {}, display {:?}, pause {}, quiet {}",
        grid.observation_space().n,
        grid.living_reward(),
        grid.noise(),
        setup.display(),
        setup.pause(),
        setup.quiet()
    );

    Ok(())
}
