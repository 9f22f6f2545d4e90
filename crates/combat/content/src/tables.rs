//! Table-driven scaling formulas.
//!
//! # Formulas
//!
//! ```text
//! hit_chance = clamp(base + (accuracy - dodge_chance × 100) × per_point,
//!                    min_chance, max_chance)
//!
//! damage = effective_damage
//! if physical: damage ×= 1 - defense / (defense + armor_constant)
//! if not true: damage ×= (1 - resistance) × (1 + weakness)
//! damage = max(damage, minimum_damage)
//! ```

use combat_core::{
    Combatant, DamagePacket, DamageType, OracleError, ScalingOracle, StatKind,
};

/// Accuracy-to-hit-chance conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitTable {
    pub base_chance: f64,
    /// Hit chance gained per point of accuracy above the defender's evasion.
    pub per_point: f64,
    pub min_chance: f64,
    pub max_chance: f64,
}

impl Default for HitTable {
    fn default() -> Self {
        Self {
            base_chance: 0.85,
            per_point: 0.01,
            min_chance: 0.05,
            max_chance: 0.95,
        }
    }
}

/// Mitigation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageTable {
    /// Defense equal to this value halves physical damage.
    pub armor_constant: f64,
    pub minimum_damage: f64,
}

impl Default for DamageTable {
    fn default() -> Self {
        Self {
            armor_constant: 50.0,
            minimum_damage: 1.0,
        }
    }
}

/// Balance tables consumed by [`TableScaling`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScalingTables {
    pub hit: HitTable,
    pub damage: DamageTable,
}

impl ScalingTables {
    /// Checks that the tables describe usable formulas.
    ///
    /// # Errors
    ///
    /// [`OracleError::InvalidData`] naming the first offending field.
    pub fn validate(&self) -> Result<(), OracleError> {
        let hit = &self.hit;
        let probability = |value: f64| (0.0..=1.0).contains(&value);
        if !(probability(hit.min_chance) && probability(hit.max_chance)) {
            return Err(OracleError::InvalidData(
                "hit.min_chance and hit.max_chance must lie in [0, 1]".into(),
            ));
        }
        if hit.min_chance > hit.max_chance {
            return Err(OracleError::InvalidData(
                "hit.min_chance exceeds hit.max_chance".into(),
            ));
        }
        if !(hit.base_chance.is_finite() && hit.per_point.is_finite()) {
            return Err(OracleError::InvalidData(
                "hit.base_chance and hit.per_point must be finite".into(),
            ));
        }
        if !(self.damage.armor_constant.is_finite() && self.damage.armor_constant > 0.0) {
            return Err(OracleError::InvalidData(
                "damage.armor_constant must be positive".into(),
            ));
        }
        if !(self.damage.minimum_damage.is_finite() && self.damage.minimum_damage >= 0.0) {
            return Err(OracleError::InvalidData(
                "damage.minimum_damage must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// [`ScalingOracle`] evaluating [`ScalingTables`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TableScaling {
    tables: ScalingTables,
}

impl TableScaling {
    pub fn new(tables: ScalingTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ScalingTables {
        &self.tables
    }
}

impl ScalingOracle for TableScaling {
    fn calculate_hit_chance(
        &self,
        attacker: &dyn Combatant,
        defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        let table = &self.tables.hit;
        if !(table.min_chance <= table.max_chance) {
            return Err(OracleError::InvalidData(format!(
                "hit chance bounds [{}, {}] are not ordered",
                table.min_chance, table.max_chance
            )));
        }
        let accuracy = attacker.stat(StatKind::Accuracy);
        let evasion = defender.stat(StatKind::DodgeChance) * 100.0;
        let chance = table.base_chance + (accuracy - evasion) * table.per_point;
        if !chance.is_finite() {
            return Err(OracleError::ScalingFailed(format!(
                "hit chance for accuracy {accuracy} vs evasion {evasion} is not finite"
            )));
        }
        Ok(chance.clamp(table.min_chance, table.max_chance))
    }

    fn compute_damage(
        &self,
        packet: &DamagePacket,
        _attacker: &dyn Combatant,
        defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        let table = &self.tables.damage;
        let mut damage = packet.effective_damage();

        if packet.damage_type == DamageType::Physical {
            let defense = defender.stat(StatKind::Defense).max(0.0);
            damage *= 1.0 - defense / (defense + table.armor_constant);
        }
        if packet.damage_type != DamageType::True {
            let affinities = defender.affinities();
            let resistance = affinities.resistance(packet.damage_type).clamp(0.0, 1.0);
            let weakness = affinities.weakness(packet.damage_type).max(0.0);
            damage *= (1.0 - resistance) * (1.0 + weakness);
        }

        if !damage.is_finite() {
            return Err(OracleError::InvalidData(format!(
                "damage from packet {:?} is not finite",
                packet.source
            )));
        }
        Ok(damage.max(table.minimum_damage))
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{CombatActor, CombatConfig, CombatantId, Weapon};

    use super::*;

    fn scaling() -> TableScaling {
        TableScaling::new(ScalingTables::default())
    }

    #[test]
    fn hit_chance_follows_accuracy_and_evasion() {
        let sharp = CombatActor::builder(CombatantId(1), "Archer")
            .stat(StatKind::Accuracy, 5.0)
            .build();
        let nimble = CombatActor::builder(CombatantId(2), "Thief")
            .stat(StatKind::DodgeChance, 0.1)
            .build();

        let chance = scaling()
            .calculate_hit_chance(&sharp, &nimble)
            .expect("finite");
        // 0.85 + (5 - 10) × 0.01
        assert!((chance - 0.80).abs() < 1e-9);
    }

    #[test]
    fn hit_chance_is_clamped() {
        let sniper = CombatActor::builder(CombatantId(1), "Sniper")
            .stat(StatKind::Accuracy, 500.0)
            .build();
        let dummy = CombatActor::builder(CombatantId(2), "Dummy").build();
        assert_eq!(
            scaling().calculate_hit_chance(&sniper, &dummy).ok(),
            Some(0.95)
        );
    }

    #[test]
    fn physical_damage_is_reduced_by_defense() {
        let attacker = CombatActor::builder(CombatantId(1), "Knight").build();
        let tank = CombatActor::builder(CombatantId(2), "Tank")
            .stat(StatKind::Defense, 50.0)
            .build();
        let axe = Weapon::new("axe", 40.0, DamageType::Physical);
        let packet =
            DamagePacket::from_weapon_attack(&attacker, &tank, Some(&axe), &CombatConfig::new())
                .expect("valid parties");

        let damage = scaling()
            .compute_damage(&packet, &attacker, &tank)
            .expect("finite");
        assert!((damage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn resistance_and_weakness_scale_elemental_damage() {
        let caster = CombatActor::builder(CombatantId(1), "Sel").build();
        let golem = CombatActor::builder(CombatantId(2), "Golem")
            .stat(StatKind::Defense, 1000.0)
            .resistance(DamageType::Fire, 0.5)
            .weakness(DamageType::Fire, 0.2)
            .build();
        let packet = DamagePacket::from_spell_cast(&caster, &golem, 10.0, None, DamageType::Fire)
            .expect("valid parties");

        let damage = scaling()
            .compute_damage(&packet, &caster, &golem)
            .expect("finite");
        // defense ignored for fire; 10 × 0.5 × 1.2
        assert!((damage - 6.0).abs() < 1e-9);
    }

    #[test]
    fn true_damage_ignores_mitigation_but_respects_floor() {
        let caster = CombatActor::builder(CombatantId(1), "Sel").build();
        let warded = CombatActor::builder(CombatantId(2), "Warded")
            .resistance(DamageType::True, 1.0)
            .build();
        let packet = DamagePacket::from_spell_cast(&caster, &warded, 0.2, None, DamageType::True)
            .expect("valid parties");
        assert_eq!(
            scaling().compute_damage(&packet, &caster, &warded).ok(),
            Some(1.0)
        );
    }

    #[test]
    fn inverted_bounds_are_an_error_not_a_panic() {
        let mut tables = ScalingTables::default();
        tables.hit.min_chance = 0.9;
        tables.hit.max_chance = 0.1;
        let scaling = TableScaling::new(tables);
        let a = CombatActor::builder(CombatantId(1), "A").build();
        let b = CombatActor::builder(CombatantId(2), "B").build();

        assert!(matches!(
            scaling.calculate_hit_chance(&a, &b),
            Err(OracleError::InvalidData(_))
        ));

        tables.hit.max_chance = f64::NAN;
        assert!(TableScaling::new(tables).calculate_hit_chance(&a, &b).is_err());
    }

    #[test]
    fn validation_catches_inverted_bounds() {
        let mut tables = ScalingTables::default();
        assert!(tables.validate().is_ok());
        tables.hit.min_chance = 0.99;
        assert!(matches!(tables.validate(), Err(OracleError::InvalidData(_))));
    }
}
