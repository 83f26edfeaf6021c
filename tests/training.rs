use std::num::NonZeroUsize;

use neural_network_engine::{
    Archetype, Network, NetworkOptions,
    arch::loss::Mse,
    dataset::{Dataset, WindowOptions},
    training::{Trainer, generate_rng},
};

#[test]
fn trains_on_a_windowed_series() {
    let series: Vec<f64> = (0..60).map(|i| 5. + (i as f64 * 0.3).sin()).collect();
    let window = WindowOptions {
        visible: 6,
        prediction: 3,
        ..Default::default()
    };
    let dataset = Dataset::from_series(&series, &window).unwrap();
    assert_eq!(dataset.len(), 60 - 9);

    let mut options = NetworkOptions::new();
    options
        .set_archetype(Archetype::DeepPerceptron)
        .set_input_neurons(6)
        .unwrap()
        .set_middle_neurons(4)
        .unwrap()
        .set_output_neurons(3)
        .unwrap()
        .set_middle_layers(2);

    let mut rng = generate_rng(Some(42));
    let mut network = Network::new(options);
    network.initialize_weights(&mut rng);

    let epochs = NonZeroUsize::new(20).unwrap();
    let mut trainer = Trainer::new(network, dataset.clone(), epochs, Mse::new(), rng);
    let losses = trainer.train().unwrap();

    assert_eq!(losses.len(), 20);
    assert!(losses.last().unwrap() < losses.first().unwrap());
    assert!(trainer.evaluate(&dataset).unwrap().is_finite());
    assert_eq!(trainer.network().output().unwrap().len(), 3);
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = || {
        let series: Vec<f64> = (0..30).map(|i| 2. + (i % 7) as f64).collect();
        let dataset = Dataset::from_series(&series, &WindowOptions::default()).unwrap();

        let mut options = NetworkOptions::new();
        options.set_input_neurons(10).unwrap().set_output_neurons(3).unwrap();

        let mut rng = generate_rng(Some(9));
        let mut network = Network::new(options);
        network.initialize_weights(&mut rng);

        let epochs = NonZeroUsize::new(5).unwrap();
        let mut trainer = Trainer::new(network, dataset, epochs, Mse::new(), rng);
        trainer.train().unwrap();
        trainer.into_network()
    };

    assert_eq!(run(), run());
}
