use formation::config::DEFAULT_PARTICLE_COUNT;
use formation::EngineConfig;

fn main() {
    env_logger::init();

    let particle_count = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_PARTICLE_COUNT);

    let config = EngineConfig::new().with_particle_count(particle_count);
    if let Err(e) = formation::window::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
