//! Actor templates and the oracle that serves them.
//!
//! A template carries everything an [`ActorState`] needs except identity and
//! location. Templates are plain data so content files can describe the whole
//! roster; [`ActorTemplate::builder`] covers code and tests.

use std::collections::BTreeMap;

use behaviour_order::BehaviourOrder;

use crate::behaviour::ActorBehaviour;
use crate::state::{
    ActorState, AttributeLedger, Capabilities, EntityId, Inventory, Item, Location, LootEntry,
    Weapon,
};
use crate::weather::WeatherAffinity;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    /// Catalog key, e.g. `"red_wolf"`.
    pub id: String,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_stamina: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
    pub intrinsic_weapon: Weapon,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    pub capabilities: Capabilities,
    /// Priority order, highest first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behaviours: Vec<ActorBehaviour>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounty: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<LootEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinity: Option<WeatherAffinity>,
}

impl ActorTemplate {
    /// Creates a fresh actor with full meters.
    pub fn instantiate(&self, id: EntityId, location: Location) -> ActorState {
        ActorState {
            id,
            template: self.id.clone(),
            location,
            ledger: AttributeLedger::new(self.max_health, self.max_stamina, self.defense),
            inventory: Inventory::new(self.inventory.clone()),
            capabilities: self.capabilities,
            behaviours: BehaviourOrder::new(self.behaviours.clone()),
            intrinsic_weapon: self.intrinsic_weapon,
            weapon: self.weapon,
            follow_target: None,
            bounty: self.bounty,
            loot: self.loot.clone(),
            affinity: self.affinity,
        }
    }

    pub fn builder(id: impl Into<String>) -> ActorTemplateBuilder {
        ActorTemplateBuilder::new(id)
    }
}

/// Builder for constructing actor templates.
///
/// Defaults: 10 health, no stamina, no defense, a 1-damage 100% intrinsic
/// weapon, targetable and able to act, no behaviours.
pub struct ActorTemplateBuilder {
    template: ActorTemplate,
}

impl ActorTemplateBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            template: ActorTemplate {
                id: id.into(),
                max_health: 10,
                max_stamina: 0,
                defense: 0,
                intrinsic_weapon: Weapon::intrinsic(1, 100),
                weapon: None,
                capabilities: Capabilities::TARGETABLE | Capabilities::CAN_ACT,
                behaviours: Vec::new(),
                inventory: Vec::new(),
                bounty: 0,
                loot: Vec::new(),
                affinity: None,
            },
        }
    }

    pub fn health(mut self, max_health: u32) -> Self {
        self.template.max_health = max_health;
        self
    }

    pub fn stamina(mut self, max_stamina: u32) -> Self {
        self.template.max_stamina = max_stamina;
        self
    }

    pub fn defense(mut self, defense: u32) -> Self {
        self.template.defense = defense;
        self
    }

    pub fn intrinsic_weapon(mut self, damage: u32, hit_rate: u32) -> Self {
        self.template.intrinsic_weapon = Weapon::intrinsic(damage, hit_rate);
        self
    }

    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.template.weapon = Some(weapon);
        self
    }

    /// Adds capabilities on top of the defaults.
    pub fn with(mut self, capabilities: Capabilities) -> Self {
        self.template.capabilities |= capabilities;
        self
    }

    /// Replaces the capability set entirely.
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.template.capabilities = capabilities;
        self
    }

    pub fn behaviours(mut self, behaviours: impl IntoIterator<Item = ActorBehaviour>) -> Self {
        self.template.behaviours = behaviours.into_iter().collect();
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.template.inventory.push(item);
        self
    }

    pub fn bounty(mut self, bounty: u32) -> Self {
        self.template.bounty = bounty;
        self
    }

    pub fn loot(mut self, item: Item, chance: u32) -> Self {
        self.template.loot.push(LootEntry { item, chance });
        self
    }

    pub fn affinity(mut self, affinity: WeatherAffinity) -> Self {
        self.template.affinity = Some(affinity);
        self
    }

    pub fn build(self) -> ActorTemplate {
        self.template
    }
}

/// Serves actor templates by catalog key.
pub trait TemplateOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<&ActorTemplate>;
}

/// In-memory template catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, ActorTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a template under its own id.
    pub fn insert(&mut self, template: ActorTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorTemplate> {
        self.templates.values()
    }
}

impl FromIterator<ActorTemplate> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = ActorTemplate>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for template in iter {
            catalog.insert(template);
        }
        catalog
    }
}

impl TemplateOracle for TemplateCatalog {
    fn template(&self, id: &str) -> Option<&ActorTemplate> {
        self.templates.get(id)
    }
}
