use std::process::ExitCode;

use fdnet::{telemetry, train_loop, Network, RunConfig};
use tracing::error;

// Usage: fdnet [run-config.json]
// Without an argument the stock XOR run is trained.
fn main() -> ExitCode {
    telemetry::init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => match RunConfig::load_json(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(%path, "failed to load run config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => RunConfig::default(),
    };

    let mut rng = config.rng();
    let mut network = Network::from_spec(&config.network);
    let mut gradient = network.gradient_buffer();
    network.randomize(&mut rng, config.init_low, config.init_high);

    let inputs = config.dataset.inputs();
    let targets = config.dataset.targets();
    let cost = train_loop(&mut network, &mut gradient, inputs, targets, &config.train);

    print!("{}", network.render(&config.network.name));
    println!("cost = {cost:.6}");
    for i in 0..inputs.rows() {
        let input = inputs.row(i).to_vec();
        let output = network.predict(&input, Network::COST_ACTIVATION).to_vec();
        let rounded: Vec<f32> = output.iter().map(|x| x.round()).collect();
        println!("{input:?} -> {rounded:?} (raw {output:?})");
    }

    ExitCode::SUCCESS
}
