use fdnet::{telemetry, train_loop, ActivationFunction, Dataset, Network, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    telemetry::init_tracing();

    let data = Dataset::xor();
    let mut rng = StdRng::seed_from_u64(69);
    let mut network = Network::new(&[2, 4, 1]);
    let mut gradient = network.gradient_buffer();
    network.randomize(&mut rng, 0.0, 1.0);

    let mut config = TrainConfig::new(100_000, 1e-1, 1e-1);
    config.log_every = 10_000;
    let cost = train_loop(&mut network, &mut gradient, data.inputs(), data.targets(), &config);

    print!("{network}");
    println!("cost = {cost:.6}");

    for a in 0..2 {
        for b in 0..2 {
            let out = network.predict(&[a as f32, b as f32], ActivationFunction::Sigmoid)[(0, 0)];
            println!("{a} ^ {b} = {}", out.round());
        }
    }
}
