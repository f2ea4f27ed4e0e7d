use anyhow::Result;
use herd_shared::WorldSnapshot;
use herd_sim::{run, write_json_line, RunOptions, Scenario};
use serde_json::json;

/// Two herds of two agents, mirrored around the origin
fn mirrored_scenario() -> serde_json::Value {
    json!({
        "dt": 0.1,
        "ticks": 40,
        "herds": [
            {
                "label": "west",
                "agents": [
                    { "position": { "x": -4.0, "y": 0.0, "z": -1.0 } },
                    { "position": { "x": -4.0, "y": 0.0, "z": 1.0 } }
                ]
            },
            {
                "label": "east",
                "agents": [
                    { "position": { "x": 4.0, "y": 0.0, "z": -1.0 } },
                    { "position": { "x": 4.0, "y": 0.0, "z": 1.0 } }
                ]
            }
        ]
    })
}

fn run_collecting(scenario: &Scenario, snapshot_every: u64) -> Result<Vec<WorldSnapshot>> {
    let mut world = scenario.build()?;
    let options = RunOptions {
        ticks: scenario.ticks,
        dt: scenario.dt,
        snapshot_every,
    };

    let mut snapshots = Vec::new();
    run(&mut world, &options, |snapshot| {
        snapshots.push(snapshot.clone());
        Ok(())
    })?;
    Ok(snapshots)
}

#[test]
fn test_threat_positions_after_first_tick() -> Result<()> {
    let scenario = Scenario::from_json(&mirrored_scenario().to_string())?;
    let snapshots = run_collecting(&scenario, 1)?;

    let first = &snapshots[0];
    assert_eq!(first.tick, 1);
    assert_eq!(first.herds[0].label, "west");
    assert_eq!(first.herds[0].centroid.x, -4.0);
    assert_eq!(first.herds[0].threat_position.x, 4.0);
    assert_eq!(first.herds[1].threat_position.x, -4.0);
    Ok(())
}

#[test]
fn test_herds_flee_each_other() -> Result<()> {
    let scenario = Scenario::from_json(&mirrored_scenario().to_string())?;
    let snapshots = run_collecting(&scenario, 1)?;
    assert_eq!(snapshots.len(), 40);

    let last = snapshots.last().unwrap();
    let west = &last.herds[0];
    let east = &last.herds[1];

    for agent in &west.agents {
        assert!(agent.position.x < -4.0, "west agent did not flee: {:?}", agent.position);
        assert_eq!(agent.position.y, 0.0);
    }
    for agent in &east.agents {
        assert!(agent.position.x > 4.0, "east agent did not flee: {:?}", agent.position);
    }

    // Mirror symmetry survives the simulation.
    for (w, e) in west.agents.iter().zip(&east.agents) {
        assert!((w.position.x + e.position.x).abs() < 1e-3);
        assert!((w.position.z - e.position.z).abs() < 1e-3);
    }
    Ok(())
}

#[test]
fn test_snapshot_interval() -> Result<()> {
    let scenario = Scenario::from_json(&mirrored_scenario().to_string())?;

    let every_ten = run_collecting(&scenario, 10)?;
    let ticks: Vec<u64> = every_ten.iter().map(|s| s.tick).collect();
    assert_eq!(ticks, vec![10, 20, 30, 40]);

    assert!(run_collecting(&scenario, 0)?.is_empty());
    Ok(())
}

#[test]
fn test_seeded_scatter_is_reproducible() -> Result<()> {
    let mut scenario = Scenario::two_herds();
    scenario.ticks = 25;

    let first = run_collecting(&scenario, 5)?;
    let second = run_collecting(&scenario, 5)?;
    assert_eq!(first, second);
    assert_eq!(first[0].agent_count(), 24);

    scenario.seed += 1;
    let other = run_collecting(&scenario, 5)?;
    assert_ne!(first, other);
    Ok(())
}

#[test]
fn test_single_herd_has_no_threat() -> Result<()> {
    let scenario = Scenario::from_json(
        &json!({
            "ticks": 5,
            "herds": [
                { "agents": [ { "position": { "x": 1.0, "z": 1.0 } }, { "position": { "x": 3.0, "z": 1.0 } } ] }
            ]
        })
        .to_string(),
    )?;

    let snapshots = run_collecting(&scenario, 1)?;
    for snapshot in &snapshots {
        let herd = &snapshot.herds[0];
        assert_eq!(herd.label, "herd-0");
        assert_eq!(herd.threat_position, herd_shared::Point3::default());
        assert!(herd.centroid.is_finite());
    }
    Ok(())
}

#[test]
fn test_invalid_scenarios_are_rejected() {
    let no_herds = Scenario::from_json(&json!({ "herds": [] }).to_string());
    assert!(no_herds.is_err());

    let negative_dt = Scenario::from_json(
        &json!({ "dt": -0.5, "herds": [ { "agents": [] } ] }).to_string(),
    );
    let message = format!("{:#}", negative_dt.unwrap_err());
    assert!(message.contains("Time step"), "unexpected error: {}", message);

    let bad_radius = Scenario::from_json(
        &json!({ "herds": [ { "settings": { "flight_zone_radius": -1.0 } } ] }).to_string(),
    );
    assert!(bad_radius.is_err());

    let malformed = Scenario::from_json("{ herds: ");
    assert!(malformed.is_err());
}

#[test]
fn test_run_rejects_bad_dt() -> Result<()> {
    let scenario = Scenario::two_herds();
    let mut world = scenario.build()?;
    let options = RunOptions {
        ticks: 3,
        dt: f32::NAN,
        snapshot_every: 1,
    };

    assert!(run(&mut world, &options, |_| Ok(())).is_err());
    assert_eq!(world.sim.tick_count(), 0);
    Ok(())
}

#[test]
fn test_json_lines_output() -> Result<()> {
    let mut scenario = Scenario::from_json(&mirrored_scenario().to_string())?;
    scenario.ticks = 6;
    let mut world = scenario.build()?;
    let options = RunOptions {
        ticks: scenario.ticks,
        dt: scenario.dt,
        snapshot_every: 2,
    };

    let mut buffer: Vec<u8> = Vec::new();
    let report = run(&mut world, &options, |snapshot| write_json_line(&mut buffer, snapshot))?;
    assert_eq!(report.ticks, 6);
    assert_eq!(report.snapshots, 3);

    let text = String::from_utf8(buffer)?;
    let parsed: Vec<WorldSnapshot> = text
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[2].tick, 6);
    assert_eq!(parsed[2].herds.len(), 2);
    Ok(())
}

#[test]
fn test_bundled_scenario_loads() -> Result<()> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/three_herds.json");
    let mut scenario = Scenario::load(&path)?;
    assert_eq!(scenario.herds.len(), 3);
    assert_eq!(scenario.herds[1].settings.escape_weight, 8.0);
    assert_eq!(scenario.herds[1].settings.cohesion.base, 0.5);

    scenario.ticks = 10;
    let snapshots = run_collecting(&scenario, 10)?;
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].agent_count(), 38);
    Ok(())
}
