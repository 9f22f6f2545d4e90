use std::sync::Mutex;

use combat_core::{
    AttackSource, CombatActor, CombatConfig, CombatEngine, CombatEnv, CombatEvent,
    CombatEventKind, Combatant, CombatantId, DamagePacket, DamageType, Offhand, OracleError,
    PcgRng, RngOracle, Role, ScalingOracle, ScriptedRng, SpellDefinition, SpellId, SpellOracle,
    StatKind, StatusEffectKind, TelemetryContext, TelemetrySink, Weapon,
};

// ============================================================================
// Mock oracles
// ============================================================================

/// Fixed hit chance and fixed damage, regardless of the packet.
struct MockScaling {
    hit_chance: f64,
    damage: f64,
}

impl ScalingOracle for MockScaling {
    fn calculate_hit_chance(
        &self,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        Ok(self.hit_chance)
    }

    fn compute_damage(
        &self,
        _packet: &DamagePacket,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        Ok(self.damage)
    }
}

/// Hit chance always fails; damage comes from the packet.
struct BrokenHitChance;

impl ScalingOracle for BrokenHitChance {
    fn calculate_hit_chance(
        &self,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        Err(OracleError::ScalingFailed("accuracy table missing".into()))
    }

    fn compute_damage(
        &self,
        packet: &DamagePacket,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        Ok(packet.effective_damage())
    }
}

/// Fails damage computation against one specific defender.
struct FailsAgainst(CombatantId);

impl ScalingOracle for FailsAgainst {
    fn calculate_hit_chance(
        &self,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        Ok(1.0)
    }

    fn compute_damage(
        &self,
        packet: &DamagePacket,
        _attacker: &dyn Combatant,
        defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        if defender.id() == self.0 {
            Err(OracleError::ScalingFailed("armor data corrupt".into()))
        } else {
            Ok(packet.effective_damage())
        }
    }
}

/// Passes packet damage through unchanged.
struct PacketScaling {
    hit_chance: f64,
}

impl ScalingOracle for PacketScaling {
    fn calculate_hit_chance(
        &self,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        Ok(self.hit_chance)
    }

    fn compute_damage(
        &self,
        packet: &DamagePacket,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        Ok(packet.effective_damage())
    }
}

struct Grimoire(Vec<SpellDefinition>);

impl SpellOracle for Grimoire {
    fn load_spell(&self, id: &SpellId) -> Option<SpellDefinition> {
        self.0.iter().find(|spell| &spell.id == id).cloned()
    }
}

#[derive(Default)]
struct RecordingTelemetry {
    events: Mutex<Vec<(String, TelemetryContext)>>,
}

impl TelemetrySink for RecordingTelemetry {
    fn emit(&self, event: &str, context: &TelemetryContext) {
        if let Ok(mut events) = self.events.lock() {
            events.push((event.to_owned(), *context));
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

const HERO: CombatantId = CombatantId(1);

fn hero() -> CombatActor {
    CombatActor::builder(HERO, "Aria")
        .stat(StatKind::Attack, 20.0)
        .weapon(Weapon::new("longsword", 15.0, DamageType::Physical))
        .build()
}

fn foe(id: u32, name: &str) -> CombatActor {
    CombatActor::builder(CombatantId(id), name)
        .stat(StatKind::Defense, 10.0)
        .build()
}

fn engine<'a, R: RngOracle>(scaling: &'a dyn ScalingOracle, rng: R) -> CombatEngine<'a, R> {
    CombatEngine::new(CombatEnv::new(scaling), CombatConfig::new(), rng)
}

// ============================================================================
// Roll sequence
// ============================================================================

#[test]
fn failed_hit_roll_records_only_a_miss() {
    let scaling = MockScaling {
        hit_chance: 0.5,
        damage: 40.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::new([0.9]).then(0.0));
    let mut roster = vec![hero(), foe(2, "Goblin")];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(outcome.success);
    assert_eq!(outcome.total_damage, 0.0);
    assert_eq!(outcome.count(CombatEventKind::AttackMissed), 1);
    assert_eq!(outcome.count(CombatEventKind::AttackDodged), 0);
    assert_eq!(outcome.count(CombatEventKind::AttackBlocked), 0);
    assert_eq!(outcome.count(CombatEventKind::DamageDealt), 0);
    assert_eq!(engine.rng().draws(), 1, "a miss must not roll dodge or block");
    assert_eq!(roster[1].current_health(), 100.0);
}

#[test]
fn guaranteed_block_consumes_no_draw() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 40.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::new([0.0, 0.99]));
    let mut roster = vec![
        hero(),
        CombatActor::builder(CombatantId(2), "Sentinel")
            .offhand(Offhand::new("tower shield", 1.0))
            .build(),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert_eq!(outcome.count(CombatEventKind::AttackBlocked), 1);
    assert_eq!(engine.rng().draws(), 2, "hit and dodge only");
    assert_eq!(roster[1].current_health(), 100.0);
}

#[test]
fn dodge_stops_resolution() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 40.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::new([0.0, 0.1]));
    let mut roster = vec![
        hero(),
        CombatActor::builder(CombatantId(2), "Rogue")
            .stat(StatKind::DodgeChance, 0.5)
            .build(),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert_eq!(outcome.count(CombatEventKind::AttackDodged), 1);
    assert_eq!(outcome.total_damage, 0.0);
    assert_eq!(engine.rng().draws(), 2);
    assert_eq!(outcome.description, "Aria attacks Rogue (100% to hit); Rogue dodges Aria's attack");
}

#[test]
fn scenario_damage_equals_formula_result() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 13.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut roster = vec![hero(), foe(2, "Goblin")];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(outcome.success);
    assert_eq!(roster[1].current_health(), 87.0);
    assert_eq!(outcome.count(CombatEventKind::DamageDealt), 1);
    assert_eq!(outcome.damage_to(CombatantId(2)), 13.0);
}

#[test]
fn zero_crit_chance_never_exceeds_formula() {
    let scaling = MockScaling {
        hit_chance: 0.8,
        damage: 17.0,
    };
    for seed in 0..32 {
        let mut engine = engine(&scaling, PcgRng::seeded(seed));
        let mut roster = vec![hero(), foe(2, "Goblin")];

        let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

        for event in outcome.events_of(CombatEventKind::DamageDealt) {
            assert!(event.damage() <= 17.0);
            assert!(!event.critical());
        }
        assert_eq!(outcome.count(CombatEventKind::CriticalHit), 0);
    }
}

#[test]
fn critical_hit_multiplies_damage() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 10.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut roster = vec![
        CombatActor::builder(HERO, "Aria")
            .weapon(Weapon::new("dagger", 4.0, DamageType::Physical))
            .stat(StatKind::CritChance, 1.0)
            .stat(StatKind::CritMultiplier, 2.0)
            .build(),
        foe(2, "Goblin"),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert_eq!(outcome.total_damage, 20.0);
    assert_eq!(outcome.count(CombatEventKind::CriticalHit), 1);
    let kinds: Vec<_> = outcome.events.iter().map(CombatEvent::kind).collect();
    assert_eq!(
        kinds,
        [
            CombatEventKind::AttackStarted,
            CombatEventKind::CriticalHit,
            CombatEventKind::DamageDealt,
        ]
    );
}

#[test]
fn hit_chance_failure_falls_back_to_guaranteed_hit() {
    let mut engine = engine(&BrokenHitChance, ScriptedRng::constant(0.999));
    let mut roster = vec![hero(), foe(2, "Goblin")];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(outcome.success);
    assert_eq!(outcome.total_damage, 15.0);
    assert!(matches!(
        outcome.events.first(),
        Some(CombatEvent::AttackStarted { hit_chance, .. }) if *hit_chance == 1.0
    ));
}

// ============================================================================
// Status effects
// ============================================================================

#[test]
fn status_multipliers_apply_outgoing_then_incoming() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 20.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut berserker = hero();
    berserker.status_mut().add(StatusEffectKind::Berserk);
    let mut roster = vec![
        berserker,
        CombatActor::builder(CombatantId(2), "Paladin")
            .status(StatusEffectKind::Shielded)
            .build(),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    // 20 x 1.5 (berserk) x 0.5 (shielded)
    assert!((outcome.total_damage - 15.0).abs() < 1e-9);
}

#[test]
fn stunned_attacker_is_rejected() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 20.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut stunned = hero();
    stunned.status_mut().add(StatusEffectKind::Stunned);
    let mut roster = vec![stunned, foe(2, "Goblin")];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(!outcome.success);
    assert!(outcome.events.is_empty());
    assert_eq!(outcome.description, "Aria is incapacitated and cannot attack");
}

// ============================================================================
// Preconditions and target selection
// ============================================================================

#[test]
fn no_weapon_no_spell_martial_is_rejected() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 20.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut roster = vec![
        CombatActor::builder(HERO, "Brawler").build(),
        foe(2, "Goblin"),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(!outcome.success);
    assert!(outcome.description.contains("no valid weapon or spell"));
    assert!(outcome.events.is_empty());
    assert_eq!(engine.rng().draws(), 0);
}

#[test]
fn dead_or_missing_attacker_is_rejected() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 20.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut roster = vec![
        CombatActor::builder(HERO, "Aria")
            .weapon(Weapon::new("sword", 5.0, DamageType::Physical))
            .health(0.0, 100.0)
            .build(),
        foe(2, "Goblin"),
    ];

    let dead = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);
    assert_eq!(dead.description, "Aria is dead and cannot attack");

    let missing = engine.execute_attack(&mut roster, CombatantId::NONE, &[CombatantId(2)], None);
    assert!(!missing.success);
    assert!(missing.events.is_empty());
}

#[test]
fn max_targets_limits_resolution_in_input_order() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 5.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut cleaver = hero();
    cleaver.stats.set(StatKind::MaxTargets, 2.0);
    let mut roster = vec![
        cleaver,
        CombatActor::builder(CombatantId(3), "Corpse")
            .health(0.0, 40.0)
            .build(),
        foe(2, "Goblin"),
        foe(4, "Wolf"),
        foe(5, "Bat"),
    ];

    let outcome = engine.execute_attack(
        &mut roster,
        HERO,
        &[
            CombatantId(3),
            CombatantId(2),
            HERO,
            CombatantId(4),
            CombatantId(5),
        ],
        None,
    );

    let resolved: Vec<_> = outcome
        .events_of(CombatEventKind::AttackStarted)
        .map(|event| event.subject().id)
        .collect();
    assert_eq!(resolved, [CombatantId(2), CombatantId(4)]);
    assert_eq!(roster[4].current_health(), 100.0);
    assert_eq!(outcome.total_damage, 10.0);
}

#[test]
fn wide_sweep_resolves_every_requested_target() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 1.0,
    };
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut sweeper = hero();
    sweeper.stats.set(StatKind::MaxTargets, 20.0);
    let mut roster = vec![sweeper];
    roster.extend((2..=26).map(|id| foe(id, "Rat")));
    let candidates: Vec<CombatantId> = (2..=26).map(CombatantId).collect();

    let outcome = engine.execute_attack(&mut roster, HERO, &candidates, None);

    assert!(outcome.success, "{}", outcome.description);
    let resolved: Vec<_> = outcome
        .events_of(CombatEventKind::AttackStarted)
        .map(|event| event.subject().id)
        .collect();
    assert_eq!(resolved, candidates[..20]);
    assert_eq!(outcome.total_damage, 20.0);
    assert_eq!(roster[21].current_health(), 100.0);
}

#[test]
fn first_per_target_error_aborts_remaining_targets() {
    let scaling = FailsAgainst(CombatantId(3));
    let mut engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut sweeper = hero();
    sweeper.stats.set(StatKind::MaxTargets, 3.0);
    let mut roster = vec![sweeper, foe(2, "Goblin"), foe(3, "Wolf"), foe(4, "Bat")];

    let outcome = engine.execute_attack(
        &mut roster,
        HERO,
        &[CombatantId(2), CombatantId(3), CombatantId(4)],
        None,
    );

    assert!(!outcome.success);
    // Events of the target resolved before the failure survive.
    assert_eq!(outcome.damage_to(CombatantId(2)), 15.0);
    assert_eq!(roster[1].current_health(), 85.0);
    // The failing target and everything after it are untouched.
    assert_eq!(roster[2].current_health(), 100.0);
    assert_eq!(roster[3].current_health(), 100.0);
    assert!(outcome.events.iter().all(|event| event.subject().id == CombatantId(2)));
    assert!(outcome
        .description
        .ends_with("attack on Wolf failed: scaling formula failed: armor data corrupt"));
}

// ============================================================================
// Damage paths
// ============================================================================

#[test]
fn explicit_spell_source_overrides_weapon() {
    let scaling = PacketScaling { hit_chance: 1.0 };
    let spells = Grimoire(vec![SpellDefinition::new("smite", 99.0, DamageType::Lightning)]);
    let mut engine = CombatEngine::new(
        CombatEnv::new(&scaling).with_spells(&spells),
        CombatConfig::new(),
        ScriptedRng::constant(0.5),
    );
    let mut roster = vec![hero(), foe(2, "Goblin")];

    let outcome = engine.execute_attack(
        &mut roster,
        HERO,
        &[CombatantId(2)],
        Some(AttackSource::Spell {
            spell_id: "smite".into(),
            base_power: 10.0,
        }),
    );

    // caller power 10, no intellect, 1.1 spell bonus; element from the grimoire
    assert!((outcome.total_damage - 11.0).abs() < 1e-9);
    let dealt = outcome.events_of(CombatEventKind::DamageDealt).next();
    assert_eq!(dealt.and_then(CombatEvent::damage_type), Some(DamageType::Lightning));
}

#[test]
fn untyped_spell_uses_keyword_shim() {
    let scaling = PacketScaling { hit_chance: 1.0 };
    let spells = Grimoire(vec![SpellDefinition::untyped("frost_bolt", 10.0)]);
    let mut engine = CombatEngine::new(
        CombatEnv::new(&scaling).with_spells(&spells),
        CombatConfig::new(),
        ScriptedRng::constant(0.5),
    );
    let mut roster = vec![
        CombatActor::builder(HERO, "Sel")
            .role(Role::Caster)
            .casting(Some("frost_bolt".into()))
            .build(),
        CombatActor::builder(CombatantId(2), "Drake")
            .weakness(DamageType::Cold, 0.5)
            .build(),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(outcome.success, "{}", outcome.description);
    assert!(outcome.description.contains("cold damage to Drake (weak 50%)"));
}

#[test]
fn unknown_spell_fails_the_target() {
    let scaling = PacketScaling { hit_chance: 1.0 };
    let spells = Grimoire(Vec::new());
    let mut engine = CombatEngine::new(
        CombatEnv::new(&scaling).with_spells(&spells),
        CombatConfig::new(),
        ScriptedRng::constant(0.5),
    );
    let mut roster = vec![
        CombatActor::builder(HERO, "Sel")
            .pending_spell("meteor")
            .build(),
        foe(2, "Goblin"),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(!outcome.success);
    assert_eq!(outcome.description, "attack on Goblin failed: spell 'meteor' not found");
}

// ============================================================================
// Death and telemetry
// ============================================================================

#[test]
fn lethal_hit_emits_death_and_telemetry() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 50.0,
    };
    let telemetry = RecordingTelemetry::default();
    let mut engine = CombatEngine::new(
        CombatEnv::new(&scaling).with_telemetry(&telemetry),
        CombatConfig::new(),
        ScriptedRng::constant(0.5),
    );
    let mut roster = vec![
        hero(),
        CombatActor::builder(CombatantId(2), "Rat")
            .health(8.0, 8.0)
            .build(),
    ];

    let outcome = engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert_eq!(roster[1].current_health(), 0.0);
    assert!(!roster[1].is_alive());
    assert_eq!(outcome.count(CombatEventKind::Death), 1);
    assert!(outcome.description.ends_with("Rat is defeated"));

    let recorded = telemetry.events.lock().expect("telemetry lock");
    assert_eq!(recorded.len(), 1);
    let (name, context) = &recorded[0];
    assert_eq!(name, "attack_hit");
    assert!(context.lethal);
    assert_eq!(context.defender, CombatantId(2));
}

#[test]
fn no_telemetry_on_miss() {
    let scaling = MockScaling {
        hit_chance: 0.0,
        damage: 50.0,
    };
    let telemetry = RecordingTelemetry::default();
    let mut engine = CombatEngine::new(
        CombatEnv::new(&scaling).with_telemetry(&telemetry),
        CombatConfig::new(),
        ScriptedRng::constant(0.5),
    );
    let mut roster = vec![hero(), foe(2, "Goblin")];

    engine.execute_attack(&mut roster, HERO, &[CombatantId(2)], None);

    assert!(telemetry.events.lock().expect("telemetry lock").is_empty());
}

// ============================================================================
// Healing
// ============================================================================

#[test]
fn healing_never_exceeds_max_health() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 0.0,
    };
    let engine = engine(&scaling, ScriptedRng::constant(0.5));
    for amount in [0.5, 10.0, 60.0, 1e9] {
        let mut roster = vec![
            CombatActor::builder(CombatantId(1), "Sel").build(),
            CombatActor::builder(CombatantId(2), "Aria")
                .health(40.0, 100.0)
                .build(),
        ];

        let outcome =
            engine.apply_healing(&mut roster, CombatantId(1), CombatantId(2), amount, None);

        assert!(outcome.success);
        assert!(roster[1].current_health() <= roster[1].max_health());
        assert_eq!(outcome.total_healing, amount.min(60.0));
    }
}

#[test]
fn healing_a_dead_target_fails() {
    let scaling = MockScaling {
        hit_chance: 1.0,
        damage: 0.0,
    };
    let engine = engine(&scaling, ScriptedRng::constant(0.5));
    let mut roster = vec![
        CombatActor::builder(CombatantId(1), "Sel").build(),
        CombatActor::builder(CombatantId(2), "Aria")
            .health(0.0, 100.0)
            .build(),
    ];

    let outcome = engine.apply_healing(&mut roster, CombatantId(1), CombatantId(2), 25.0, None);

    assert!(!outcome.success);
    assert!(outcome.description.contains("dead"));
    assert_eq!(roster[1].current_health(), 0.0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn same_seed_same_description() {
    let scaling = PacketScaling { hit_chance: 0.7 };
    let run = || {
        let mut engine = engine(&scaling, PcgRng::seeded(0xC0FFEE));
        let mut roster = vec![
            CombatActor::builder(HERO, "Aria")
                .weapon(Weapon::new("sword", 9.0, DamageType::Physical))
                .stat(StatKind::CritChance, 0.3)
                .stat(StatKind::MaxTargets, 3.0)
                .build(),
            CombatActor::builder(CombatantId(2), "Goblin")
                .stat(StatKind::DodgeChance, 0.2)
                .build(),
            CombatActor::builder(CombatantId(3), "Wolf")
                .stat(StatKind::BlockChance, 0.25)
                .build(),
        ];
        let targets = [CombatantId(2), CombatantId(3)];
        (0..5)
            .map(|_| {
                engine
                    .execute_attack(&mut roster, HERO, &targets, None)
                    .description
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}
