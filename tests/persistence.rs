use neural_network_engine::{
    Archetype, Network, NetworkOptions,
    dataset::{Dataset, WindowOptions},
    persistence,
};
use rand::{SeedableRng, rngs::StdRng};

fn trained_network() -> Network {
    let mut options = NetworkOptions::new();
    options
        .set_archetype(Archetype::AutoEncoder)
        .set_input_neurons(3)
        .unwrap()
        .set_middle_neurons(2)
        .unwrap()
        .set_output_neurons(3)
        .unwrap();

    let mut net = Network::new(options);
    net.initialize_weights(&mut StdRng::seed_from_u64(42));
    for _ in 0..5 {
        net.work(Some(&[0.2, -0.4, 0.1])).unwrap();
        net.learn(Some(&[1., 0., 0.])).unwrap();
    }
    net
}

#[test]
fn a_reloaded_network_answers_bit_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves").join("network.json");

    let mut net = trained_network();
    persistence::try_save(&net, &path).unwrap();
    let mut loaded: Network = persistence::try_load(&path).unwrap();
    assert_eq!(loaded, net);

    net.work(Some(&[0.3, 0.3, -0.1])).unwrap();
    loaded.work(Some(&[0.3, 0.3, -0.1])).unwrap();
    assert_eq!(loaded.output(), net.output());
}

#[test]
fn a_missing_network_loads_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let net: Network = persistence::load_or_default(dir.path().join("network.json"));
    assert_eq!(net, Network::default());
}

#[test]
fn a_tampered_configuration_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");
    persistence::try_save(&trained_network(), &path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, json.replace("\"momentum\":0.3", "\"momentum\":1.5")).unwrap();

    assert!(persistence::try_load::<Network, _>(&path).is_err());
}

#[test]
fn a_tampered_neuron_id_loads_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");

    let mut net = Network::default();
    net.initialize_weights(&mut StdRng::seed_from_u64(42));
    persistence::try_save(&net, &path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let tampered = json.replacen("\"next\":[2", "\"next\":[999", 1);
    assert_ne!(tampered, json);
    std::fs::write(&path, tampered).unwrap();

    assert!(persistence::try_load::<Network, _>(&path).is_err());
    let mut loaded: Network = persistence::load_or_default(&path);
    assert_eq!(loaded, Network::default());
    assert!(loaded.set_weights(999, vec![0.1]).is_err());
}

#[tokio::test]
async fn datasets_survive_an_async_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dataset.json");

    let series: Vec<f64> = (1..=30).map(|i| 10. + (i as f64 * 0.4).cos()).collect();
    let window = WindowOptions {
        visible: 5,
        prediction: 2,
        ..Default::default()
    };
    let dataset = Dataset::from_series(&series, &window).unwrap();

    persistence::save_async(&dataset, &path).await;
    let loaded: Dataset = persistence::load_or_default_async(&path).await;
    assert_eq!(loaded, dataset);
}
