use fdnet::{Dataset, FiniteDiff, Matrix, Network, Sgd};
use rand::{rngs::StdRng, SeedableRng};

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[test]
fn single_neuron_gradient_matches_derivative() {
    let (x, w, b, t) = (0.5f32, 0.3f32, -0.2f32, 1.0f32);
    let mut net = Network::new(&[1, 1]);
    *net.weight_mut(0) = Matrix::from_vec(1, 1, vec![w]);
    *net.bias_mut(0) = Matrix::from_vec(1, 1, vec![b]);
    let mut grad = net.gradient_buffer();

    let inputs = Matrix::from_vec(1, 1, vec![x]);
    let targets = Matrix::from_vec(1, 1, vec![t]);
    FiniteDiff::new(1e-3).estimate_gradient(&mut net, &mut grad, inputs.view(), targets.view());

    // C = (o - t)^2, o = sigmoid(w x + b)
    let o = sigmoid(w * x + b);
    let dc_db = 2.0 * (o - t) * o * (1.0 - o);
    let dc_dw = dc_db * x;

    let (gb, gw) = (grad.bias(0)[(0, 0)], grad.weight(0)[(0, 0)]);
    assert!((gb - dc_db).abs() < 2e-3, "bias grad {gb} vs {dc_db}");
    assert!((gw - dc_dw).abs() < 2e-3, "weight grad {gw} vs {dc_dw}");
}

#[test]
fn estimation_is_read_only_on_parameters() {
    let data = Dataset::xor();
    let mut rng = StdRng::seed_from_u64(21);
    let mut net = Network::new(&[2, 4, 1]);
    net.randomize(&mut rng, -1.0, 1.0);
    let mut grad = net.gradient_buffer();

    let before: Vec<Vec<f32>> = (0..net.layer_count())
        .flat_map(|i| [net.weight(i).as_slice().to_vec(), net.bias(i).as_slice().to_vec()])
        .collect();

    FiniteDiff::new(0.1).estimate_gradient(&mut net, &mut grad, data.inputs(), data.targets());

    let after: Vec<Vec<f32>> = (0..net.layer_count())
        .flat_map(|i| [net.weight(i).as_slice().to_vec(), net.bias(i).as_slice().to_vec()])
        .collect();
    let bits = |v: &Vec<Vec<f32>>| -> Vec<u32> {
        v.iter().flatten().map(|x| x.to_bits()).collect()
    };
    assert_eq!(bits(&before), bits(&after));
}

#[test]
fn small_steps_descend_for_most_seeds() {
    let data = Dataset::xor();
    let estimator = FiniteDiff::new(1e-3);
    let optimizer = Sgd::new(1e-2);

    let trials = 100;
    let mut descended = 0;
    for seed in 0..trials {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut net = Network::new(&[2, 3, 1]);
        net.randomize(&mut rng, -1.0, 1.0);
        let mut grad = net.gradient_buffer();

        let before =
            estimator.estimate_gradient(&mut net, &mut grad, data.inputs(), data.targets());
        optimizer.apply_gradient(&mut net, &grad);
        let after = net.cost(data.inputs(), data.targets());
        if after <= before {
            descended += 1;
        }
    }
    assert!(descended >= 90, "only {descended}/{trials} steps reduced the cost");
}
