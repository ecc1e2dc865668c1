use streamfit::{
    DataPoint,
    DataStream,
    DecaySchedule,
    ModelError,
    OnlineLearner,
    OnlineModel,
    TrainEvent,
    VecStream,
};

fn checkpoints(events: &[TrainEvent]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|event| match event {
            TrainEvent::Checkpoint(progress) => Some(progress.processed),
            _ => None,
        })
        .collect()
}

#[test]
fn test_rates_after_n_advances() {
    let cases = vec![
        // (power_t, t0, steps)
        (0.0, 0, 5),
        (0.5, 0, 10),
        (1.0, 3, 7),
        (2.3, 10, 4),
    ];

    for (power_t, t0, steps) in cases {
        let mut model = OnlineModel::new(2, "online");
        model.set_parameter("eta", "0.8").unwrap();
        model.set_parameter("bias_eta", "0.2").unwrap();
        model.set_parameter("power_t", &power_t.to_string()).unwrap();
        model.set_parameter("t", &t0.to_string()).unwrap();

        for _ in 0..steps {
            model.advance(1);
        }

        let iter = t0 + steps;
        let schedule = (iter as f32).powf(power_t);
        assert_eq!(model.cur_iter_num(), iter);
        assert!(
            (model.eta() - 0.8 / schedule).abs() < 1e-6,
            "eta mismatch for power_t={}",
            power_t
        );
        assert!(
            (model.bias_eta() - 0.2 / schedule).abs() < 1e-6,
            "bias_eta mismatch for power_t={}",
            power_t
        );
        assert_eq!(model.schedule(), DecaySchedule::from_power_t(power_t));
    }
}

#[test]
fn test_negative_values_rejected() {
    for name in ["eta", "bias_eta", "power_t", "t"] {
        let mut model = OnlineModel::new(2, "online");
        model.advance(4);
        let hp = model.hyperparameters().clone();

        let result = model.set_parameter(name, "-1");
        assert!(
            matches!(result, Err(ModelError::InvalidArgument { .. })),
            "{} accepted a negative value",
            name
        );
        assert_eq!(model.hyperparameters(), &hp);
        assert_eq!(model.cur_iter_num(), 1);
    }
}

#[test]
fn test_empty_stream() {
    let mut model = OnlineModel::new(2, "online");
    let mut stream = VecStream::new(Vec::new(), 8);
    let mut events: Vec<TrainEvent> = Vec::new();

    let rate = model.train(&mut stream, &mut events);

    assert_eq!(rate, 0.0);
    assert!(!rate.is_nan());
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], TrainEvent::Started { .. }));
    assert!(matches!(events[1], TrainEvent::Finished(p) if p.processed == 0));
}

#[test]
fn test_default_rule_end_to_end() {
    let data = (1..=10)
        .map(|i| DataPoint::new(vec![i as f32; 3], if i % 2 == 0 { 1 } else { -1 }))
        .collect();
    let mut stream = VecStream::new(data, 3);
    let mut model = OnlineModel::new(2, "online");
    let mut events: Vec<TrainEvent> = Vec::new();

    let rate = model.train(&mut stream, &mut events);

    assert_eq!(rate, 1.0);
    assert_eq!(checkpoints(&events), vec![2, 4, 8]);
    match events.last() {
        Some(TrainEvent::Finished(progress)) => {
            assert_eq!(progress.processed, 10);
            assert_eq!(progress.mistakes, 10);
            assert_eq!(progress.formatted_rate(), "1.000000");
            assert_eq!(progress.update_num, 0);
        }
        other => panic!("expected a final report, got {:?}", other),
    }
    assert_eq!(model.cur_iter_num(), 10);
    assert_eq!(model.dim(), 3);
}

#[test]
fn test_started_event_carries_summary() {
    let mut model = OnlineModel::new(2, "online");
    let mut stream = VecStream::new(vec![DataPoint::new(vec![1.0], 1)], 1);
    let mut events: Vec<TrainEvent> = Vec::new();

    model.train(&mut stream, &mut events);

    match &events[0] {
        TrainEvent::Started { summary } => {
            assert!(summary.contains("\"online\""));
            assert!(summary.contains("\"power_t\""));
        }
        other => panic!("expected a start event, got {:?}", other),
    }
}

#[test]
fn test_normalization_does_not_touch_stream_data() {
    let data = vec![DataPoint::new(vec![3.0, 4.0], 0)];
    let mut stream = VecStream::new(data, 1);
    let mut model = OnlineModel::new(2, "online");
    model.set_parameter("norm", "l2").unwrap();
    let mut events: Vec<TrainEvent> = Vec::new();

    model.train(&mut stream, &mut events);

    stream.reset();
    let batch = stream.next_batch().unwrap();
    assert_eq!(batch[0].features.to_vec(), vec![3.0, 4.0]);
}
