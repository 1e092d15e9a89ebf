//! Quarters Headless Validation Harness
//!
//! Exercises the roster engine end to end — no CLI, no database, no
//! rendering. Every check drives the public engine surface the way the
//! excluded collaborators would.
//!
//! Usage:
//!   cargo run -p quarters-simtest
//!   cargo run -p quarters-simtest -- --verbose

use quarters_core::components::Room;
use quarters_core::error::RosterError;
use quarters_core::prelude::*;
use quarters_logic::intake::IntakeRecord;
use quarters_logic::rules::{self, RESIDENCE_CAPACITY, WORKSPACE_CAPACITY};

// ── Intake batch (same JSON shape bulk loaders feed the engine) ─────────
const INTAKE_JSON: &str = include_str!("../data/intake.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Machine-readable run summary, printed in verbose mode.
#[derive(serde::Serialize)]
struct HarnessSummary {
    passed: usize,
    failed: usize,
    total: usize,
}

fn result(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Quarters Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Occupancy rule sweep
    results.extend(validate_rules(verbose));

    // 2. Registration and identity collisions
    results.extend(validate_registration(verbose));

    // 3. Bulk intake batch
    results.extend(validate_intake_batch(verbose));

    // 4. Capacity bounds under allocation/reallocation churn
    results.extend(validate_capacity_churn(verbose));

    // 5. Reallocation rules
    results.extend(validate_reallocation(verbose));

    // 6. Reporting queries
    results.extend(validate_reporting(verbose));

    // 7. Snapshot round-trips
    results.extend(validate_snapshots(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if verbose {
        let summary = HarnessSummary {
            passed,
            failed,
            total,
        };
        if let Ok(json) = serde_json::to_string(&summary) {
            println!("{}", json);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

/// occupant_count must equal the number of persons pointing at each room,
/// and never exceed the room kind's capacity.
fn occupancy_consistent(engine: &RosterEngine) -> Result<(), String> {
    for kind in [RoomKind::Workspace, RoomKind::Residence] {
        for &entity in engine.registry().rooms(kind) {
            let (name, occupants, capacity) = match engine.registry().world().get::<&Room>(entity)
            {
                Ok(room) => (room.name.clone(), room.occupants, room.capacity()),
                Err(_) => continue,
            };
            if occupants > capacity {
                return Err(format!("room '{}' over capacity: {}", name, occupants));
            }
            let pointing = engine
                .persons_in_room(&name)
                .map(|list| list.len() as u32)
                .unwrap_or(0);
            if pointing != occupants {
                return Err(format!(
                    "room '{}' counts {} occupants but {} persons point at it",
                    name, occupants, pointing
                ));
            }
        }
    }
    Ok(())
}

// ── 1. Occupancy rules ──────────────────────────────────────────────────

fn validate_rules(verbose: bool) -> Vec<TestResult> {
    println!("--- Occupancy Rules ---");
    let mut results = Vec::new();

    let capacities = RoomKind::Workspace.capacity() == WORKSPACE_CAPACITY
        && RoomKind::Residence.capacity() == RESIDENCE_CAPACITY;
    results.push(result(
        "rule_capacities",
        capacities,
        format!(
            "{} {}, {} {}",
            RoomKind::Workspace.label(),
            WORKSPACE_CAPACITY,
            RoomKind::Residence.label(),
            RESIDENCE_CAPACITY
        ),
    ));

    let eligibility = Category::Member.may_occupy(RoomKind::Workspace)
        && Category::Member.may_occupy(RoomKind::Residence)
        && Category::Staff.may_occupy(RoomKind::Workspace)
        && !Category::Staff.may_occupy(RoomKind::Residence);
    results.push(result(
        "rule_eligibility",
        eligibility,
        format!("{} barred from residences", Category::Staff.label()),
    ));

    let mut bounds_ok = true;
    for kind in [RoomKind::Workspace, RoomKind::Residence] {
        for occupants in 0..=kind.capacity() + 1 {
            let expected = kind.capacity().saturating_sub(occupants);
            bounds_ok &= rules::open_slots(kind, occupants) == expected;
            bounds_ok &= rules::has_vacancy(kind, occupants) == (occupants < kind.capacity());
        }
    }
    results.push(result(
        "rule_vacancy_bounds",
        bounds_ok,
        "open_slots and has_vacancy agree over the full range",
    ));

    if verbose {
        println!(
            "  workspace slots at 4 occupants: {}",
            rules::open_slots(RoomKind::Workspace, 4)
        );
    }
    results
}

// ── 2. Registration ─────────────────────────────────────────────────────

fn validate_registration(verbose: bool) -> Vec<TestResult> {
    println!("--- Registration ---");
    let mut results = Vec::new();

    let mut engine = RosterEngine::new();
    let created = engine.create_workspace("Red").is_ok()
        && engine.create_residence("Haven").is_ok()
        && engine.register_member("John Doe", "jdoe@org.test").is_ok()
        && engine.register_staff("Amara Obi", "amara@org.test").is_ok();
    results.push(result(
        "registration_succeeds",
        created,
        format!(
            "{} rooms, {} persons",
            engine.workspace_count() + engine.residence_count(),
            engine.member_count() + engine.staff_count()
        ),
    ));

    let cross_kind = matches!(
        engine.create_residence("Red"),
        Err(RosterError::DuplicateEntity { .. })
    );
    results.push(result(
        "room_names_unique_across_kinds",
        cross_kind,
        "residence 'Red' rejected",
    ));

    let dup_contact = matches!(
        engine.register_member("Johnny Doe", "jdoe@org.test"),
        Err(RosterError::DuplicateEntity { .. })
    );
    results.push(result(
        "contact_collision_rejected",
        dup_contact,
        "second 'jdoe@org.test' rejected",
    ));

    let no_overwrite = engine.member_count() == 1 && engine.workspace_count() == 1;
    results.push(result(
        "collision_is_not_an_overwrite",
        no_overwrite,
        "collection sizes unchanged",
    ));

    if verbose {
        println!("  registry: {:?} members", engine.member_count());
    }
    results
}

// ── 3. Intake batch ─────────────────────────────────────────────────────

fn validate_intake_batch(verbose: bool) -> Vec<TestResult> {
    println!("--- Intake Batch ---");
    let mut results = Vec::new();

    let records: Vec<IntakeRecord> = match serde_json::from_str(INTAKE_JSON) {
        Ok(r) => r,
        Err(e) => {
            results.push(result(
                "intake_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };
    results.push(result(
        "intake_parse",
        records.len() == 8,
        format!("{} records", records.len()),
    ));

    let mut engine = RosterEngine::new();
    for i in 0..2 {
        let _ = engine.create_workspace(&format!("ws-{}", i));
    }
    let _ = engine.create_residence("Haven");

    let mut admitted = 0;
    let mut desks = 0;
    let mut beds = 0;
    for record in &records {
        match engine.admit(record) {
            Ok(outcome) => {
                admitted += 1;
                if outcome.workspace.is_some() {
                    desks += 1;
                }
                if outcome.residence.is_some() {
                    beds += 1;
                }
            }
            Err(e) => {
                results.push(result("intake_admit", false, e.to_string()));
                return results;
            }
        }
    }
    results.push(result(
        "intake_admit",
        admitted == records.len(),
        format!("{} admitted", admitted),
    ));

    // 2 workspaces hold 12; every record gets a desk
    results.push(result(
        "intake_desks",
        desks == records.len(),
        format!("{} desks granted", desks),
    ));

    // 5 members want a residence but "Haven" holds 4; staff never lodge
    results.push(result(
        "intake_beds_capped",
        beds == RESIDENCE_CAPACITY as usize,
        format!("{} beds granted", beds),
    ));

    // 6 members total, 4 housed: the refused requester plus the one who
    // never asked are both still waiting
    let waiting = engine.unallocated().members_without_residence.len();
    results.push(result(
        "intake_waitlist",
        waiting == 2,
        format!("{} members without a residence", waiting),
    ));

    results.push(match occupancy_consistent(&engine) {
        Ok(()) => result("intake_occupancy_consistent", true, "counts match"),
        Err(e) => result("intake_occupancy_consistent", false, e),
    });

    if verbose {
        println!("  {} desks, {} beds", desks, beds);
    }
    results
}

// ── 4. Capacity churn ───────────────────────────────────────────────────

fn validate_capacity_churn(verbose: bool) -> Vec<TestResult> {
    println!("--- Capacity Churn ---");
    let mut results = Vec::new();

    let mut engine = RosterEngine::new();
    for i in 0..5 {
        let _ = engine.create_workspace(&format!("ws-{}", i));
    }
    for i in 0..3 {
        let _ = engine.create_residence(&format!("res-{}", i));
    }

    // 5 workspaces hold 30; admit 34 persons and expect 4 without a desk
    let mut no_desk = 0;
    for i in 0..34 {
        let category = if i % 4 == 0 {
            Category::Staff
        } else {
            Category::Member
        };
        let record = IntakeRecord::new(
            format!("churn{}@org.test", i),
            format!("Churn Person {}", i),
            category,
            category == Category::Member,
        );
        match engine.admit(&record) {
            Ok(outcome) if outcome.workspace.is_none() => no_desk += 1,
            Ok(_) => {}
            Err(e) => {
                results.push(result("churn_admit", false, e.to_string()));
                return results;
            }
        }
    }
    results.push(result(
        "churn_overflow_unassigned",
        no_desk == 4,
        format!("{} persons without a desk", no_desk),
    ));

    let saturated = engine.registry().rooms(RoomKind::Workspace).iter().all(|&entity| {
        engine
            .registry()
            .world()
            .get::<&Room>(entity)
            .map(|room| rules::open_slots(room.kind, room.occupants) == 0)
            .unwrap_or(false)
    });
    results.push(result(
        "churn_workspaces_saturated",
        saturated,
        "every workspace at capacity",
    ));

    // Shuffle people between rooms; full destinations must refuse cleanly
    let mut moves = 0;
    let mut refusals = 0;
    for i in 0..34 {
        let contact = format!("churn{}@org.test", i);
        let destination = format!("ws-{}", i % 5);
        match engine.reallocate(&contact, &destination) {
            Ok(()) => moves += 1,
            Err(RosterError::RoomFull { .. }) => refusals += 1,
            Err(e) => {
                results.push(result("churn_reallocate", false, e.to_string()));
                return results;
            }
        }
    }
    results.push(result(
        "churn_reallocate",
        moves + refusals == 34,
        format!("{} moves, {} full-room refusals", moves, refusals),
    ));

    results.push(match occupancy_consistent(&engine) {
        Ok(()) => result("churn_occupancy_consistent", true, "counts match"),
        Err(e) => result("churn_occupancy_consistent", false, e),
    });

    if verbose {
        println!("  {} moves, {} refusals", moves, refusals);
    }
    results
}

// ── 5. Reallocation rules ───────────────────────────────────────────────

fn validate_reallocation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Reallocation ---");
    let mut results = Vec::new();

    let mut engine = RosterEngine::new();
    let _ = engine.create_workspace("Blue");
    let _ = engine.create_workspace("Red");
    let _ = engine.create_residence("Haven");
    let _ = engine.register_member("John Doe", "jdoe@org.test");
    let _ = engine.register_staff("Amara Obi", "amara@org.test");

    // First-time placement through reallocate
    let placed = engine.reallocate("jdoe@org.test", "Blue").is_ok();
    results.push(result("first_time_placement", placed, "John into 'Blue'"));

    let moved = engine.reallocate("jdoe@org.test", "Red").is_ok();
    let blue_empty = engine
        .persons_in_room("Blue")
        .map(|l| l.is_empty())
        .unwrap_or(false);
    results.push(result(
        "move_gives_previous_room_back",
        moved && blue_empty,
        "'Blue' emptied, 'Red' gained",
    ));

    let ineligible = matches!(
        engine.reallocate("amara@org.test", "Haven"),
        Err(RosterError::Ineligible { .. })
    );
    results.push(result(
        "staff_residence_refused",
        ineligible,
        "staff kept out of 'Haven'",
    ));

    let unknown = matches!(
        engine.reallocate("ghost@org.test", "Red"),
        Err(RosterError::PersonNotFound { .. })
    ) && matches!(
        engine.reallocate("jdoe@org.test", "Atlantis"),
        Err(RosterError::RoomNotFound { .. })
    );
    results.push(result(
        "unknown_identities_refused",
        unknown,
        "ghost person and room rejected",
    ));

    results.push(match occupancy_consistent(&engine) {
        Ok(()) => result("reallocation_occupancy_consistent", true, "counts match"),
        Err(e) => result("reallocation_occupancy_consistent", false, e),
    });

    results
}

// ── 6. Reporting ────────────────────────────────────────────────────────

fn validate_reporting(verbose: bool) -> Vec<TestResult> {
    println!("--- Reporting ---");
    let mut results = Vec::new();

    let mut engine = RosterEngine::new();
    let _ = engine.create_workspace("Red");
    let _ = engine.create_residence("Haven");

    // Reports on an unallocated registry
    let empty_state = matches!(engine.all_allocations(), Err(RosterError::EmptyState));
    results.push(result(
        "empty_state_reported",
        empty_state,
        "allocation listing refused with no data",
    ));

    let _ = engine.register_staff("Amara Obi", "amara@org.test");
    let _ = engine.register_member("John Doe", "jdoe@org.test");
    let _ = engine.allocate_workspace("amara@org.test", Category::Staff);
    let _ = engine.allocate_workspace("jdoe@org.test", Category::Member);
    let _ = engine.allocate_residence("jdoe@org.test");

    let occupants = engine.persons_in_room("Red").unwrap_or_default();
    let staff_first = occupants.len() == 2 && occupants[0].contact == "amara@org.test";
    results.push(result(
        "persons_in_room_order",
        staff_first,
        "staff listed before members",
    ));

    let allocations = engine.all_allocations().unwrap_or_default();
    let covered = allocations.len() == 2
        && allocations[0].kind == RoomKind::Workspace
        && allocations[1].kind == RoomKind::Residence;
    results.push(result(
        "allocation_listing_covers_rooms",
        covered,
        format!("{} occupied rooms listed", allocations.len()),
    ));

    let report = engine.unallocated();
    results.push(result(
        "unallocated_buckets_empty",
        report.is_empty(),
        "everyone placed",
    ));

    let rendered = report.render();
    let none_marker = rendered.matches("none").count() == 3;
    results.push(result(
        "render_substitutes_none",
        none_marker,
        "empty sections read 'none'",
    ));

    if verbose {
        println!("{}", rendered);
    }
    results
}

// ── 7. Snapshots ────────────────────────────────────────────────────────

fn validate_snapshots(verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshots ---");
    let mut results = Vec::new();

    let mut engine = RosterEngine::new();
    let _ = engine.create_workspace("Red");
    let _ = engine.create_residence("Haven");
    let _ = engine.admit(&IntakeRecord::new(
        "jdoe@org.test",
        "John Doe",
        Category::Member,
        true,
    ));
    let _ = engine.admit(&IntakeRecord::new(
        "amara@org.test",
        "Amara Obi",
        Category::Staff,
        false,
    ));

    let snapshot = engine.export_all();

    let mut restored = RosterEngine::new();
    let imported = restored.import_all(snapshot.clone()).is_ok();
    let identical = imported && restored.export_all() == snapshot;
    results.push(result(
        "import_reproduces_registry",
        identical,
        "export(import(s)) == s",
    ));

    let mut buffer = Vec::new();
    let saved = engine.save(&mut buffer).is_ok();
    let mut loaded = RosterEngine::new();
    let binary_ok = saved && loaded.load(&buffer[..]).is_ok() && loaded.export_all() == snapshot;
    results.push(result(
        "binary_roundtrip",
        binary_ok,
        format!("{} bytes", buffer.len()),
    ));

    let json_ok = snapshot
        .to_json()
        .ok()
        .and_then(|json| quarters_core::persistence::Snapshot::from_json(&json).ok())
        .map(|back| back == snapshot)
        .unwrap_or(false);
    results.push(result("json_roundtrip", json_ok, "pretty JSON view"));

    results.push(match occupancy_consistent(&restored) {
        Ok(()) => result("restored_occupancy_consistent", true, "counts match"),
        Err(e) => result("restored_occupancy_consistent", false, e),
    });

    if verbose {
        println!("  snapshot: {} bytes binary", buffer.len());
    }
    results
}
