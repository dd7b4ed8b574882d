//! End-to-end behaviour of the party kernel.

use party_runtime::prelude::*;
use rand::Rng;
use std::sync::{Arc, Mutex};

// --- Helpers ---

fn quiet_party() -> Party {
    PartyBuilder::new()
        .with_policies(Policies::idle())
        .build()
        .unwrap()
}

fn seat(party: &mut Party, kind: AgentKind, x: f64, y: f64, size: f64) -> AgentId {
    let id = party.create(kind, AgentAttrs::default().at(Position::new(x, y)).sized(size));
    party.arrive(id).unwrap();
    id
}

/// Records which agents decided, in order.
struct Recorder {
    kind: AgentKind,
    log: Arc<Mutex<Vec<(AgentKind, AgentId)>>>,
}

impl Policy for Recorder {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    fn name(&self) -> &str {
        "recorder"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        self.log.lock().unwrap().push((self.kind, room.me().id));
        Ok(Displacement::ZERO)
    }
}

fn recording_policies() -> (Policies, Arc<Mutex<Vec<(AgentKind, AgentId)>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let make = |kind| -> Box<dyn Policy> {
        Box::new(Recorder { kind, log: Arc::clone(&log) })
    };
    let policies = Policies::new(
        make(AgentKind::Normal),
        make(AgentKind::Zombie),
        make(AgentKind::Defender),
    )
    .unwrap();
    (policies, log)
}

/// Walks in a random direction without ever changing size.
struct Wanderer(AgentKind);

impl Policy for Wanderer {
    fn kind(&self) -> AgentKind {
        self.0
    }

    fn name(&self) -> &str {
        "wanderer"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        let rng = room.rng();
        Ok(Displacement::new(
            rng.gen_range(-20.0..=20.0),
            rng.gen_range(-20.0..=20.0),
        ))
    }
}

/// Collects presenter notifications as strings.
#[derive(Clone, Default)]
struct Transcript(Arc<Mutex<Vec<String>>>);

impl Transcript {
    fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Presenter for Transcript {
    fn arrive(&mut self, agent: &AgentView) {
        self.0.lock().unwrap().push(format!("arrive {}", agent.id));
    }

    fn leave(&mut self, agent: &AgentView) {
        self.0.lock().unwrap().push(format!("leave {}", agent.id));
    }

    fn remove(&mut self, agent: &AgentView) {
        self.0.lock().unwrap().push(format!("remove {}", agent.id));
    }

    fn tick_complete(&mut self, report: &TickReport, _agents: &[AgentView]) {
        self.0.lock().unwrap().push(format!("tick {}", report.tick));
    }
}

// --- Teleport gating ---

/// Teleports the nearest zombie to the far corner, without resizing.
struct Bouncer;

impl Policy for Bouncer {
    fn kind(&self) -> AgentKind {
        AgentKind::Defender
    }

    fn name(&self) -> &str {
        "bouncer"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        if let Some((zombie, _)) = room.nearest(AgentKind::Zombie) {
            let corner = room.bounds().max_corner();
            room.teleport(zombie.id, corner)?;
        }
        Ok(Displacement::ZERO)
    }
}

#[test]
fn defender_teleports_a_zombie_one_unit_away() {
    let mut party = PartyBuilder::new()
        .with_policies(Policies::idle().with(Box::new(Bouncer)))
        .build()
        .unwrap();
    seat(&mut party, AgentKind::Defender, 100.0, 100.0, 40.0);
    let zombie = seat(&mut party, AgentKind::Zombie, 141.0, 100.0, 40.0);

    let report = party.step().unwrap();
    assert_eq!(report.teleports, 1);
    assert_eq!(party.agent(zombie).unwrap().position, Position::new(800.0, 600.0));
}

#[test]
fn defender_cannot_teleport_a_zombie_ten_units_away() {
    let mut party = PartyBuilder::new()
        .with_policies(Policies::idle().with(Box::new(Bouncer)))
        .build()
        .unwrap();
    seat(&mut party, AgentKind::Defender, 100.0, 100.0, 40.0);
    let zombie = seat(&mut party, AgentKind::Zombie, 150.0, 100.0, 40.0);

    let report = party.step().unwrap();
    assert_eq!(report.teleports, 0);
    assert_eq!(party.agent(zombie).unwrap().position, Position::new(150.0, 100.0));
}

// --- Authorization ---

/// A normal that tries to shrink the nearest zombie.
struct Saboteur;

impl Policy for Saboteur {
    fn kind(&self) -> AgentKind {
        AgentKind::Normal
    }

    fn name(&self) -> &str {
        "saboteur"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        if let Some((zombie, _)) = room.nearest(AgentKind::Zombie) {
            room.resize(zombie.id, MIN_SIZE)?;
        }
        Ok(Displacement::ZERO)
    }
}

#[test]
fn resizing_another_kind_halts_the_party() {
    let mut party = PartyBuilder::new()
        .with_policies(Policies::idle().with(Box::new(Saboteur)))
        .build()
        .unwrap();
    let normal = seat(&mut party, AgentKind::Normal, 100.0, 100.0, 30.0);
    let zombie = seat(&mut party, AgentKind::Zombie, 400.0, 400.0, 40.0);

    let err = party.step().unwrap_err();
    let PartyError::Authorization(violation) = err else {
        panic!("expected an authorization violation");
    };
    assert_eq!(violation.operation.name(), "resize");
    assert_eq!(violation.caller, Caller::Agent(AgentKind::Normal));
    assert_eq!(violation.agent, zombie);
    assert_eq!(violation.agent_kind, AgentKind::Zombie);
    assert_ne!(violation.agent, normal);
    assert_eq!(party.agent(zombie).unwrap().size, 40.0);

    assert!(party.is_halted());
    assert_eq!(party.step().unwrap_err(), PartyError::Halted { tick: 1 });
    assert_eq!(party.stats().halted_at, Some(1));

    party.init(Headcount::new(0, 1, 0), Bounds::default()).unwrap();
    assert!(!party.is_halted());
    party.step().unwrap();
}

/// A zombie that tries to send normals away.
struct FakeDefender;

impl Policy for FakeDefender {
    fn kind(&self) -> AgentKind {
        AgentKind::Zombie
    }

    fn name(&self) -> &str {
        "fake-defender"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        for normal in room.present(AgentKind::Normal.into()) {
            room.alert(normal.id, Position::new(0.0, 0.0))?;
        }
        Ok(Displacement::ZERO)
    }
}

#[test]
fn only_defenders_may_alert() {
    let mut party = PartyBuilder::new()
        .with_policies(Policies::idle().with(Box::new(FakeDefender)))
        .build()
        .unwrap();
    seat(&mut party, AgentKind::Normal, 100.0, 100.0, 30.0);
    seat(&mut party, AgentKind::Zombie, 400.0, 400.0, 40.0);

    let err = party.step().unwrap_err();
    assert!(err.is_authorization());
    assert!(err.to_string().contains("zombie_alert"));
}

/// A policy that simply fails.
struct Broken;

impl Policy for Broken {
    fn kind(&self) -> AgentKind {
        AgentKind::Zombie
    }

    fn name(&self) -> &str {
        "broken"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        let me = room.me();
        Err(PartyError::policy(self.name(), me.id, me.kind, "out of brains"))
    }
}

#[test]
fn policy_failure_is_fatal_to_the_tick() {
    let mut party = PartyBuilder::new()
        .with_policies(Policies::idle().with(Box::new(Broken)))
        .build()
        .unwrap();
    seat(&mut party, AgentKind::Zombie, 400.0, 400.0, 40.0);

    assert!(matches!(party.step(), Err(PartyError::Policy(_))));
    assert_eq!(party.tick(), 0);
    assert!(matches!(party.run(3), Err(PartyError::Halted { tick: 1 })));
}

// --- Attribute bounds ---

/// Asks for absurd values and reports what it got.
struct Greedy {
    got: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl Policy for Greedy {
    fn kind(&self) -> AgentKind {
        AgentKind::Defender
    }

    fn name(&self) -> &str {
        "greedy"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        let size = room.resize_me(1_000.0)?;
        let happiness = room.set_happiness(-50.0)?;
        self.got.lock().unwrap().push((size, happiness));
        Ok(Displacement::ZERO)
    }
}

#[test]
fn size_and_happiness_are_clamped() {
    let got = Arc::new(Mutex::new(Vec::new()));
    let mut party = PartyBuilder::new()
        .with_policies(Policies::idle().with(Box::new(Greedy { got: Arc::clone(&got) })))
        .build()
        .unwrap();
    let defender = seat(&mut party, AgentKind::Defender, 100.0, 100.0, 40.0);

    party.step().unwrap();
    assert_eq!(*got.lock().unwrap(), vec![(MAX_SIZE, -1.0)]);
    let view = party.agent(defender).unwrap();
    assert_eq!(view.size, MAX_SIZE);
    assert_eq!(view.happiness, -1.0);
}

// --- Movement ---

#[test]
fn driver_moves_are_clamped_to_the_move_limit() {
    let mut party = quiet_party();
    let normal = seat(&mut party, AgentKind::Normal, 100.0, 100.0, MIN_SIZE);

    let outcome = party.move_by(normal, 0.0, -100.0).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Moved { from: Position::new(100.0, 100.0), to: Position::new(100.0, 95.0) }
    );
}

#[test]
fn no_two_agents_overlap_after_moving() {
    let mut party = PartyBuilder::new()
        .with_config(PartyConfig::default().with_seed(11))
        .with_teleport_rule(NoTeleports)
        .with_policies(
            Policies::new(
                Box::new(Wanderer(AgentKind::Normal)),
                Box::new(Wanderer(AgentKind::Zombie)),
                Box::new(Wanderer(AgentKind::Defender)),
            )
            .unwrap(),
        )
        .build()
        .unwrap();
    party.init(Headcount::new(12, 6, 4), Bounds::new(0.0, 0.0, 400.0, 300.0)).unwrap();

    for _ in 0..40 {
        party.step().unwrap();
        let present = party.get_all_present(KindQuery::Any);
        for (i, a) in present.iter().enumerate() {
            for b in &present[i + 1..] {
                let edge = a.distances_to(b).edge;
                assert!(edge > 0.0, "{} and {} overlap ({edge})", a.id, b.id);
            }
        }
    }
}

// --- Scheduling ---

#[test]
fn kinds_decide_defenders_first_then_normals_then_zombies() {
    let (policies, log) = recording_policies();
    let mut party = PartyBuilder::new().with_policies(policies).build().unwrap();
    let z1 = seat(&mut party, AgentKind::Zombie, 700.0, 500.0, 40.0);
    let n1 = seat(&mut party, AgentKind::Normal, 100.0, 100.0, 30.0);
    let d1 = seat(&mut party, AgentKind::Defender, 400.0, 100.0, 40.0);
    let n2 = seat(&mut party, AgentKind::Normal, 100.0, 300.0, 30.0);
    let absent = party.create(AgentKind::Defender, AgentAttrs::default());

    let report = party.step().unwrap();
    assert_eq!(report.decisions, 4);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            (AgentKind::Defender, d1),
            (AgentKind::Normal, n1),
            (AgentKind::Normal, n2),
            (AgentKind::Zombie, z1),
        ]
    );
    assert!(!party.agent(absent).unwrap().present);
}

#[test]
fn new_zombies_wait_a_tick_before_acting_or_infecting() {
    let (policies, log) = recording_policies();
    let mut party = PartyBuilder::new().with_policies(policies).build().unwrap();
    // A chain: the zombie touches n1, n1 touches n2, the zombie is far from n2.
    let zombie = seat(&mut party, AgentKind::Zombie, 100.0, 100.0, 40.0);
    let n1 = seat(&mut party, AgentKind::Normal, 141.0, 100.0, 40.0);
    let n2 = seat(&mut party, AgentKind::Normal, 182.0, 100.0, 40.0);

    let first = party.step().unwrap();
    assert_eq!(first.infected(), 1);
    assert_eq!(first.infections[0].victim, n1);
    let newcomer = first.infections[0].zombie;
    assert!(party.agent(n2).unwrap().present);
    assert_eq!(party.census(), Headcount::new(1, 2, 0));

    let zombies_in = |log: &[(AgentKind, AgentId)]| -> Vec<AgentId> {
        log.iter()
            .filter(|(kind, _)| *kind == AgentKind::Zombie)
            .map(|(_, id)| *id)
            .collect()
    };
    assert_eq!(zombies_in(&log.lock().unwrap()), vec![zombie]);

    log.lock().unwrap().clear();
    let second = party.step().unwrap();
    assert_eq!(zombies_in(&log.lock().unwrap()), vec![zombie, newcomer]);
    assert_eq!(second.infected(), 1);
    assert_eq!(second.infections[0].by, newcomer);
    assert_eq!(second.infections[0].victim, n2);
    assert_eq!(party.census(), Headcount::new(0, 3, 0));
}

#[test]
fn infection_counts_and_placement() {
    let mut party = quiet_party();
    seat(&mut party, AgentKind::Zombie, 200.0, 200.0, 40.0);
    let left = seat(&mut party, AgentKind::Normal, 158.0, 200.0, 42.0);
    let below = seat(&mut party, AgentKind::Normal, 200.0, 242.0, 40.0);
    seat(&mut party, AgentKind::Normal, 500.0, 500.0, 40.0);
    let before = party.census();

    let report = party.step().unwrap();
    let after = party.census();
    assert_eq!(report.infected(), 2);
    assert_eq!(after.normals, before.normals - 2);
    assert_eq!(after.zombies, before.zombies + 2);

    for (victim, position, size) in [
        (left, Position::new(158.0, 200.0), 42.0),
        (below, Position::new(200.0, 242.0), 40.0),
    ] {
        let infection = report
            .infections
            .iter()
            .find(|i| i.victim == victim)
            .expect("victim infected");
        let zombie = party.agent(infection.zombie).unwrap();
        assert_eq!(zombie.kind, AgentKind::Zombie);
        assert_eq!(zombie.position, position);
        assert_eq!(zombie.size, size);
        assert!(zombie.present);
        assert!(party.agent(victim).is_none());
    }
}

// --- Setup ---

#[test]
fn one_zombie_party_runs_without_normals() {
    let mut party = Party::new();
    let bounds = Bounds::new(0.0, 0.0, 800.0, 600.0);
    let placed = party.init(Headcount::new(0, 1, 0), bounds).unwrap();
    assert_eq!(placed, Headcount::new(0, 1, 0));

    let zombie = &party.get_all(AgentKind::Zombie)[0];
    assert!(bounds.contains(&zombie.position));

    let report = party.step().unwrap();
    assert_eq!(report.infected(), 0);
    assert_eq!(report.census, Headcount::new(0, 1, 0));
}

#[test]
fn base_kind_query_returns_every_kind() {
    let mut party = Party::new();
    party.init(Headcount::new(4, 2, 1), Bounds::default()).unwrap();
    let all = party.get_all(KindQuery::Any);
    assert_eq!(all.len(), 7);
    assert_eq!(party.get_all(AgentKind::Normal).len(), 4);
    assert_eq!(party.get_by_name(KindQuery::Any, "ID-1").len(), 1);
    assert_eq!(party.get_by_name(AgentKind::Zombie, "ID-1").len(), 0);
}

// --- Lifecycle ---

#[test]
fn presenter_hears_about_removal_before_erasure() {
    let transcript = Transcript::default();
    let mut party = PartyBuilder::new()
        .with_policies(Policies::idle())
        .with_presenter(transcript.clone())
        .build()
        .unwrap();
    let zombie = seat(&mut party, AgentKind::Zombie, 100.0, 100.0, 40.0);
    let normal = seat(&mut party, AgentKind::Normal, 141.0, 100.0, 40.0);

    let report = party.step().unwrap();
    let newcomer = report.infections[0].zombie;
    assert_eq!(
        transcript.lines(),
        vec![
            format!("arrive {zombie}"),
            format!("arrive {normal}"),
            format!("arrive {newcomer}"),
            format!("leave {normal}"),
            format!("remove {normal}"),
            "tick 1".to_string(),
        ]
    );
    assert!(party.agent(normal).is_none());
}

#[test]
fn stale_ids_are_unknown() {
    let mut party = quiet_party();
    let old = seat(&mut party, AgentKind::Normal, 100.0, 100.0, 40.0);
    party.remove(old).unwrap();
    let new = seat(&mut party, AgentKind::Normal, 100.0, 100.0, 40.0);

    assert_ne!(old, new);
    assert!(party.agent(old).is_none());
    assert_eq!(party.move_by(old, 1.0, 0.0), Err(PartyError::UnknownAgent(old)));
    assert_eq!(party.arrive(old), Err(PartyError::UnknownAgent(old)));
    assert!(party.move_by(new, 1.0, 0.0).unwrap().is_moved());
}

#[test]
fn lifecycle_events_are_recorded() {
    let mut party = quiet_party();
    let id = seat(&mut party, AgentKind::Defender, 100.0, 100.0, 40.0);
    party.leave(id).unwrap();
    party.remove(id).unwrap();

    let kind = AgentKind::Defender;
    assert_eq!(
        party.event_history(),
        &[
            PartyEvent::Arrived { id, kind },
            PartyEvent::Left { id, kind },
            PartyEvent::Removed { id, kind },
        ]
    );
}

// --- Determinism ---

#[test]
fn same_seed_same_party() {
    let run = |seed| {
        let mut party = Party::from_config(PartyConfig::default().with_seed(seed)).unwrap();
        party.reset().unwrap();
        party.run(25).unwrap();
        (party.get_all(KindQuery::Any), party.stats())
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn standard_party_runs_with_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    let mut party = PartyBuilder::new()
        .with_presenter(LogPresenter)
        .build()
        .unwrap();
    party.reset().unwrap();
    let reports = party.run(30).unwrap();
    assert_eq!(reports.len(), 30);
    assert_eq!(party.tick(), 30);

    // Infection swaps one normal for one zombie, so nobody goes missing.
    let stats = party.stats();
    assert_eq!(party.census().total() + stats.absent, PartyConfig::default().headcount.total());
    assert_eq!(party.get_all(KindQuery::Any).len(), PartyConfig::default().headcount.total());
}
