//! Concrete [`Combatant`] used by content files, tools and tests.

use super::{
    Affinities, CastingState, Combatant, CombatantId, Offhand, Role, StatBlock, StatKind,
    StatusEffectKind, StatusEffects, Weapon,
};
use crate::combat::DamageType;
use crate::env::SpellId;

/// Current and maximum of a depletable resource.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub current: f64,
    pub max: f64,
}

impl ResourcePool {
    /// A full pool.
    pub const fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    pub const fn new(current: f64, max: f64) -> Self {
        Self { current, max }
    }
}

/// Plain-data combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatActor {
    pub id: CombatantId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: Role,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatBlock,
    pub health: ResourcePool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana: ResourcePool,
    #[cfg_attr(feature = "serde", serde(default = "default_stamina"))]
    pub stamina: ResourcePool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offhand: Option<Offhand>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: StatusEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinities: Affinities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub casting: CastingState,
}

#[cfg(feature = "serde")]
fn default_stamina() -> ResourcePool {
    ResourcePool::full(CombatActor::DEFAULT_STAMINA)
}

impl CombatActor {
    pub const DEFAULT_HEALTH: f64 = 100.0;
    pub const DEFAULT_STAMINA: f64 = 100.0;

    pub fn builder(id: CombatantId, name: impl Into<String>) -> CombatActorBuilder {
        CombatActorBuilder::new(id, name)
    }

    pub fn status_mut(&mut self) -> &mut StatusEffects {
        &mut self.status
    }
}

impl Combatant for CombatActor {
    fn id(&self) -> CombatantId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stat(&self, stat: StatKind) -> f64 {
        self.stats.get(stat)
    }

    fn current_health(&self) -> f64 {
        self.health.current
    }

    fn max_health(&self) -> f64 {
        self.health.max
    }

    fn set_current_health(&mut self, value: f64) {
        self.health.current = value;
    }

    fn current_mana(&self) -> f64 {
        self.mana.current
    }

    fn max_mana(&self) -> f64 {
        self.mana.max
    }

    fn current_stamina(&self) -> f64 {
        self.stamina.current
    }

    fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    fn offhand(&self) -> Option<&Offhand> {
        self.offhand.as_ref()
    }

    fn status(&self) -> &StatusEffects {
        &self.status
    }

    fn affinities(&self) -> &Affinities {
        &self.affinities
    }

    fn casting(&self) -> &CastingState {
        &self.casting
    }

    fn role(&self) -> Role {
        self.role
    }
}

/// Builder for [`CombatActor`].
///
/// Defaults: full health of 100, no mana, full stamina of 100, unarmed,
/// martial, no effects.
#[derive(Clone, Debug)]
pub struct CombatActorBuilder {
    actor: CombatActor,
}

impl CombatActorBuilder {
    pub fn new(id: CombatantId, name: impl Into<String>) -> Self {
        Self {
            actor: CombatActor {
                id,
                name: name.into(),
                role: Role::Martial,
                stats: StatBlock::new(),
                health: ResourcePool::full(CombatActor::DEFAULT_HEALTH),
                mana: ResourcePool::default(),
                stamina: ResourcePool::full(CombatActor::DEFAULT_STAMINA),
                weapon: None,
                offhand: None,
                status: StatusEffects::empty(),
                affinities: Affinities::new(),
                casting: CastingState::idle(),
            },
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.actor.role = role;
        self
    }

    pub fn stat(mut self, stat: StatKind, value: f64) -> Self {
        self.actor.stats.set(stat, value);
        self
    }

    /// Sets current and maximum health.
    pub fn health(mut self, current: f64, max: f64) -> Self {
        self.actor.health = ResourcePool::new(current, max);
        self
    }

    pub fn mana(mut self, current: f64, max: f64) -> Self {
        self.actor.mana = ResourcePool::new(current, max);
        self
    }

    pub fn stamina(mut self, current: f64, max: f64) -> Self {
        self.actor.stamina = ResourcePool::new(current, max);
        self
    }

    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.actor.weapon = Some(weapon);
        self
    }

    pub fn offhand(mut self, offhand: Offhand) -> Self {
        self.actor.offhand = Some(offhand);
        self
    }

    pub fn status(mut self, effect: StatusEffectKind) -> Self {
        self.actor.status.add(effect);
        self
    }

    pub fn resistance(mut self, damage_type: DamageType, value: f64) -> Self {
        self.actor.affinities.resistances.insert(damage_type, value);
        self
    }

    pub fn weakness(mut self, damage_type: DamageType, value: f64) -> Self {
        self.actor.affinities.weaknesses.insert(damage_type, value);
        self
    }

    /// Marks the actor as mid-cast, optionally with a known spell.
    pub fn casting(mut self, spell: Option<SpellId>) -> Self {
        self.actor.casting = CastingState::casting(spell);
        self
    }

    pub fn pending_spell(mut self, spell: impl Into<SpellId>) -> Self {
        self.actor.casting.pending_spell = Some(spell.into());
        self
    }

    pub fn build(self) -> CombatActor {
        self.actor
    }
}
