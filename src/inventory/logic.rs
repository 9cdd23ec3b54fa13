//! Inventory, equipment and shop operations.
//!
//! The inventory is a list of catalog item ids on the character, duplicates
//! allowed. Equipped items leave the inventory and their effect stays applied
//! to the combatant until they are unequipped.

use crate::character::types::Character;
use crate::core::constants::{MAX_INVENTORY_SIZE, SELL_PRICE_DIVISOR};
use crate::data::types::{Item, ItemCatalog, ItemEffect, ItemType};
use crate::error::{GameError, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

impl EquipSlot {
    fn item_type(&self) -> ItemType {
        match self {
            EquipSlot::Weapon => ItemType::Weapon,
            EquipSlot::Armor => ItemType::Armor,
        }
    }

    fn get(&self, character: &Character) -> Option<String> {
        match self {
            EquipSlot::Weapon => character.equipped_weapon.clone(),
            EquipSlot::Armor => character.equipped_armor.clone(),
        }
    }

    fn set(&self, character: &mut Character, item_id: Option<String>) {
        match self {
            EquipSlot::Weapon => character.equipped_weapon = item_id,
            EquipSlot::Armor => character.equipped_armor = item_id,
        }
    }
}

fn lookup<'a>(items: &'a ItemCatalog, item_id: &str) -> Result<&'a Item> {
    items
        .get(item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))
}

fn apply_effect(character: &mut Character, effect: ItemEffect) {
    character.combatant.adjust_stat(effect.stat, effect.value);
}

fn remove_effect(character: &mut Character, effect: ItemEffect) {
    character
        .combatant
        .adjust_stat(effect.stat, effect.value.saturating_neg());
}

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|i| i == item_id)
}

pub fn item_count(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|i| *i == item_id).count()
}

pub fn free_slots(character: &Character) -> usize {
    MAX_INVENTORY_SIZE.saturating_sub(character.inventory.len())
}

pub fn add_item(character: &mut Character, item_id: &str) -> Result<()> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Removes one copy of the item.
pub fn remove_item(character: &mut Character, item_id: &str) -> Result<()> {
    let index = character
        .inventory
        .iter()
        .position(|i| i == item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))?;
    character.inventory.remove(index);
    Ok(())
}

/// Consumes one consumable from the inventory and applies its effect.
pub fn use_item(character: &mut Character, item_id: &str, items: &ItemCatalog) -> Result<ItemEffect> {
    if !has_item(character, item_id) {
        return Err(GameError::ItemNotFound(item_id.to_string()));
    }
    let item = lookup(items, item_id)?;
    if item.item_type != ItemType::Consumable {
        return Err(GameError::InvalidItemType(format!(
            "{} is a {}, not a consumable",
            item.name, item.item_type
        )));
    }
    if character.is_dead() {
        return Err(GameError::CharacterDead);
    }

    remove_item(character, item_id)?;
    apply_effect(character, item.effect);
    debug!(item = item_id, effect = %item.effect, "item used");
    Ok(item.effect)
}

fn equip(
    character: &mut Character,
    item_id: &str,
    items: &ItemCatalog,
    slot: EquipSlot,
) -> Result<()> {
    if !has_item(character, item_id) {
        return Err(GameError::ItemNotFound(item_id.to_string()));
    }
    let item = lookup(items, item_id)?;
    if item.item_type != slot.item_type() {
        return Err(GameError::InvalidItemType(format!(
            "{} is a {}, not a {}",
            item.name,
            item.item_type,
            slot.item_type()
        )));
    }
    if !item.effect.is_equipment_bonus() {
        return Err(GameError::InvalidItemType(format!(
            "{} has effect {}, which cannot be worn",
            item.name, item.effect
        )));
    }
    // Resolve the outgoing item before touching any state
    let previous = match slot.get(character) {
        Some(id) => Some((lookup(items, &id)?.effect, id)),
        None => None,
    };

    remove_item(character, item_id)?;
    if let Some((effect, id)) = previous {
        remove_effect(character, effect);
        character.inventory.push(id);
    }
    apply_effect(character, item.effect);
    slot.set(character, Some(item_id.to_string()));

    info!(character = %character.name(), item = item_id, slot = ?slot, "item equipped");
    Ok(())
}

fn unequip(character: &mut Character, items: &ItemCatalog, slot: EquipSlot) -> Result<String> {
    let item_id = slot
        .get(character)
        .ok_or_else(|| GameError::ItemNotFound(format!("no {} equipped", slot.item_type())))?;
    let effect = lookup(items, &item_id)?.effect;
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }

    remove_effect(character, effect);
    slot.set(character, None);
    character.inventory.push(item_id.clone());
    Ok(item_id)
}

/// Equips a weapon from the inventory. A weapon already equipped goes back
/// to the inventory and its bonus is removed.
pub fn equip_weapon(character: &mut Character, item_id: &str, items: &ItemCatalog) -> Result<()> {
    equip(character, item_id, items, EquipSlot::Weapon)
}

pub fn equip_armor(character: &mut Character, item_id: &str, items: &ItemCatalog) -> Result<()> {
    equip(character, item_id, items, EquipSlot::Armor)
}

/// Returns the id of the weapon moved back to the inventory.
pub fn unequip_weapon(character: &mut Character, items: &ItemCatalog) -> Result<String> {
    unequip(character, items, EquipSlot::Weapon)
}

pub fn unequip_armor(character: &mut Character, items: &ItemCatalog) -> Result<String> {
    unequip(character, items, EquipSlot::Armor)
}

/// Buys one item for its full cost. Returns the remaining gold.
pub fn purchase_item(character: &mut Character, item_id: &str, items: &ItemCatalog) -> Result<u64> {
    let item = lookup(items, item_id)?;
    if character.gold < item.cost {
        return Err(GameError::InsufficientResources {
            needed: item.cost,
            available: character.gold,
        });
    }
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }

    character.gold -= item.cost;
    character.inventory.push(item_id.to_string());
    info!(character = %character.name(), item = item_id, cost = item.cost, "item purchased");
    Ok(character.gold)
}

/// Sells one copy for half its cost, rounded down. Returns the gold received.
pub fn sell_item(character: &mut Character, item_id: &str, items: &ItemCatalog) -> Result<u64> {
    let item = lookup(items, item_id)?;
    remove_item(character, item_id)?;
    let price = item.cost / SELL_PRICE_DIVISOR;
    character.gold = character.gold.saturating_add(price);
    info!(character = %character.name(), item = item_id, price, "item sold");
    Ok(price)
}
