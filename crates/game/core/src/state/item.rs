//! Items, weapons and actor inventories.
//!
//! Only the capability surface the action core needs lives here: has / remove /
//! add, a rune balance, and the weapon records attacks read from. Acquisition
//! and trading belong to whatever drives the simulation.

use crate::config::{GameConfig, UpgradeParams};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    HealingVial,
    RefreshingFlask,
    Bloodberry,
    Runes,
    OldKey,
}

impl ItemKind {
    pub const fn is_consumable(self) -> bool {
        !matches!(self, ItemKind::OldKey)
    }
}

/// A single inventory or ground item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    /// Rune value for [`ItemKind::Runes`]; zero otherwise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub amount: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded: bool,
}

impl Item {
    pub const fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            amount: 0,
            upgraded: false,
        }
    }

    pub const fn runes(amount: u32) -> Self {
        Self {
            kind: ItemKind::Runes,
            amount,
            upgraded: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
    balance: u32,
}

impl Inventory {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, balance: 0 }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn has_item(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|item| item.kind == kind)
    }

    pub fn find(&self, kind: ItemKind) -> Option<&Item> {
        self.items.iter().find(|item| item.kind == kind)
    }

    pub fn find_mut(&mut self, kind: ItemKind) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.kind == kind)
    }

    /// Removes the first item of `kind`.
    pub fn remove_item(&mut self, kind: ItemKind) -> Option<Item> {
        let index = self.items.iter().position(|item| item.kind == kind)?;
        Some(self.items.remove(index))
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn credit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Deducts `amount` if affordable.
    pub fn debit(&mut self, amount: u32) -> bool {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    /// Claws, fists, branches: whatever an actor fights with bare.
    Intrinsic,
    Broadsword,
    GreatKnife,
    GiantHammer,
}

/// Special move a weapon unlocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponSkill {
    Focus,
    StabAndStep,
    GreatSlam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub kind: WeaponKind,
    pub damage: u32,
    /// Percent chance to hit before clamping.
    pub hit_rate: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrades: u32,
}

impl Weapon {
    pub const fn intrinsic(damage: u32, hit_rate: u32) -> Self {
        Self {
            kind: WeaponKind::Intrinsic,
            damage,
            hit_rate,
            upgrades: 0,
        }
    }

    pub const fn broadsword() -> Self {
        Self {
            kind: WeaponKind::Broadsword,
            damage: 110,
            hit_rate: 80,
            upgrades: 0,
        }
    }

    pub const fn great_knife() -> Self {
        Self {
            kind: WeaponKind::GreatKnife,
            damage: 75,
            hit_rate: 70,
            upgrades: 0,
        }
    }

    pub const fn giant_hammer() -> Self {
        Self {
            kind: WeaponKind::GiantHammer,
            damage: 160,
            hit_rate: 90,
            upgrades: 0,
        }
    }

    pub const fn skill(&self) -> Option<WeaponSkill> {
        match self.kind {
            WeaponKind::Intrinsic => None,
            WeaponKind::Broadsword => Some(WeaponSkill::Focus),
            WeaponKind::GreatKnife => Some(WeaponSkill::StabAndStep),
            WeaponKind::GiantHammer => Some(WeaponSkill::GreatSlam),
        }
    }

    /// Blades open wounds on hit.
    pub const fn causes_bleeding(&self) -> bool {
        matches!(self.kind, WeaponKind::GreatKnife)
    }

    /// Rune price of the next upgrade, or `None` if a smith cannot improve it.
    pub const fn upgrade_price(&self, params: &UpgradeParams) -> Option<u32> {
        match self.kind {
            WeaponKind::Broadsword => Some(params.broadsword_price),
            WeaponKind::GreatKnife => Some(params.great_knife_price),
            WeaponKind::Intrinsic | WeaponKind::GiantHammer => None,
        }
    }

    pub(crate) fn upgrade(&mut self, config: &GameConfig) {
        match self.kind {
            WeaponKind::Broadsword => self.damage += config.upgrades.broadsword_damage_step,
            WeaponKind::GreatKnife => self.hit_rate += config.upgrades.great_knife_hit_step,
            WeaponKind::Intrinsic | WeaponKind::GiantHammer => return,
        }
        self.upgrades += 1;
    }
}

impl ItemKind {
    /// Rune price of the one-time potency upgrade.
    pub const fn upgrade_price(self, params: &UpgradeParams) -> Option<u32> {
        match self {
            ItemKind::HealingVial => Some(params.healing_vial_price),
            ItemKind::RefreshingFlask => Some(params.refreshing_flask_price),
            _ => None,
        }
    }
}
