use std::collections::BTreeMap;

use rewards_export::state::{Ballot, Distribution, Project, ProjectId};
use utils::Address;

pub const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
pub const CAROL: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";
pub const DAVE: &str = "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb";

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

pub fn distribution(entries: &[(&str, f64)]) -> Distribution {
    entries
        .iter()
        .map(|(project_id, value)| (project_id.to_string(), *value))
        .collect()
}

pub fn ballot(address: &str, entries: &[(&str, f64)]) -> Ballot {
    Ballot::new(address, 2025, 1, distribution(entries))
}

pub fn project_ids(ids: &[&str]) -> Vec<ProjectId> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Project paying everything to a single contributor
pub fn solo_project(id: &str, contributor: &str) -> Project {
    Project::new(id, &format!("Project {id}"), &format!("{{\"{contributor}\": 100}}"))
}

pub fn power(entries: &[(&str, f64)]) -> BTreeMap<Address, f64> {
    entries
        .iter()
        .map(|(address, power)| (Address::new(address), *power))
        .collect()
}

/// Eight member ballots over projects 1 to 5 with several skipped projects
pub fn golden_ballots() -> Vec<Ballot> {
    vec![
        ballot("0x01", &[("2", 50.0), ("4", 30.0), ("3", 20.0), ("5", 0.0)]),
        ballot("0x02", &[("1", 23.0), ("2", 24.0), ("4", 49.0), ("5", 4.0)]),
        ballot("0x03", &[("1", 31.0), ("2", 12.0), ("4", 42.0), ("3", 10.0), ("5", 5.0)]),
        ballot("0x04", &[("1", 20.0), ("2", 20.0), ("4", 30.0), ("3", 20.0), ("5", 10.0)]),
        ballot("0x05", &[("1", 30.25), ("2", 30.25), ("4", 30.25), ("3", 9.25)]),
        ballot("0x06", &[("1", 35.0), ("4", 35.0), ("3", 20.0), ("5", 10.0)]),
        ballot("0x07", &[("1", 20.5), ("2", 22.5), ("4", 38.5), ("3", 16.5), ("5", 2.0)]),
        ballot("0x08", &[("1", 48.0), ("2", 28.0), ("3", 18.0), ("5", 6.0)]),
    ]
}

/// Expected normalized votes of `golden_ballots`, columns in project order
pub fn golden_votes() -> Vec<Vec<f64>> {
    vec![
        vec![25.617465382162504, 37.19126730303909, 14.876506921215638, 22.314760381823465, 0.0],
        vec![19.790022073979447, 20.650457816326366, 13.956425764473845, 42.16135137499968, 3.441742969387729],
        vec![31.0, 12.0, 10.0, 42.0, 5.0],
        vec![20.0, 20.0, 20.0, 30.0, 10.0],
        vec![28.85945564992768, 28.85945564992768, 8.824792223531608, 28.85945564992768, 4.596840826232873],
        vec![27.00161532655116, 22.852527638146107, 15.429494472314948, 27.00161532655116, 7.714747236157474],
        vec![20.5, 22.5, 16.5, 38.5, 2.0],
        vec![32.17116462467926, 18.766512697729574, 12.06418673425472, 32.97674039047171, 4.021395578084907],
    ]
}
