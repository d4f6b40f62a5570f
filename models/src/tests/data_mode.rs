use crate::DataMode;

/// **VALUE**: Verifies that the default mode never performs network calls.
///
/// **WHY THIS MATTERS**: First-run behavior must be simulated until the user opts in.
#[test]
fn given_no_preference_when_defaulting_then_mode_is_simulated() {
    assert_eq!(DataMode::default(), DataMode::Simulated);
    assert!(DataMode::default().use_mock_data());
}

#[test]
fn given_use_mock_flag_when_mapped_then_round_trips() {
    assert_eq!(DataMode::from_use_mock_data(true), DataMode::Simulated);
    assert_eq!(DataMode::from_use_mock_data(false), DataMode::Live);
    assert!(!DataMode::Live.use_mock_data());
}

#[test]
fn given_mode_names_when_parsed_then_accepts_aliases_and_rejects_unknown() {
    assert_eq!("Live".parse::<DataMode>().unwrap(), DataMode::Live);
    assert_eq!("mock".parse::<DataMode>().unwrap(), DataMode::Simulated);
    assert!("offline".parse::<DataMode>().is_err());
}
