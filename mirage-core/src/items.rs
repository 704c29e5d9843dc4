//! Item catalog.
//!
//! Static content: every item in the game, plus the lookup helpers the
//! shop, loot, and character creation draw from.

use crate::class_data::Class;
use crate::world::{EquipSlot, Item, ItemKind, StatKind};
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;

lazy_static! {
    /// All items in the game.
    pub static ref ITEMS: Vec<Item> = vec![
        // Weapons
        Item::new("wooden-sword", "Wooden Sword", "A basic wooden training sword.", ItemKind::Weapon, 5)
            .with_effect(StatKind::Attack, 2)
            .with_slot(EquipSlot::Weapon)
            .with_price(10),
        Item::new("iron-sword", "Iron Sword", "A dependable blade of forged iron.", ItemKind::Weapon, 15)
            .with_effect(StatKind::Attack, 5)
            .with_slot(EquipSlot::Weapon)
            .with_price(40),
        Item::new("steel-blade", "Steel Blade", "A keen-edged sword of tempered steel.", ItemKind::Weapon, 40)
            .with_effect(StatKind::Attack, 9)
            .with_slot(EquipSlot::Weapon)
            .with_price(120),
        Item::new("hunting-bow", "Hunting Bow", "A supple shortbow favored by rangers.", ItemKind::Weapon, 20)
            .with_effect(StatKind::Attack, 6)
            .with_slot(EquipSlot::Weapon)
            .with_price(60),

        // Body armor
        Item::new("cloth-robe", "Cloth Robe", "A simple cloth robe that offers minimal protection.", ItemKind::Armor, 5)
            .with_effect(StatKind::Defense, 1)
            .with_slot(EquipSlot::Armor)
            .with_price(10),
        Item::new("leather-armor", "Leather Armor", "Hardened leather that turns a glancing blow.", ItemKind::Armor, 15)
            .with_effect(StatKind::Defense, 3)
            .with_slot(EquipSlot::Armor)
            .with_price(45),
        Item::new("chainmail", "Chainmail", "Interlocking rings of iron.", ItemKind::Armor, 45)
            .with_effect(StatKind::Defense, 6)
            .with_slot(EquipSlot::Armor)
            .with_price(130),

        // Helmets
        Item::new("leather-cap", "Leather Cap", "A snug cap of boiled leather.", ItemKind::Armor, 8)
            .with_effect(StatKind::Defense, 1)
            .with_slot(EquipSlot::Helmet)
            .with_price(20),
        Item::new("iron-helm", "Iron Helm", "A heavy helm with a nose guard.", ItemKind::Armor, 25)
            .with_effect(StatKind::Defense, 3)
            .with_slot(EquipSlot::Helmet)
            .with_price(70),

        // Boots
        Item::new("leather-boots", "Leather Boots", "Simple boots made of leather.", ItemKind::Armor, 5)
            .with_effect(StatKind::Defense, 1)
            .with_slot(EquipSlot::Boots)
            .with_price(15),
        Item::new("ironshod-boots", "Ironshod Boots", "Boots reinforced with iron plates.", ItemKind::Armor, 20)
            .with_effect(StatKind::Defense, 2)
            .with_slot(EquipSlot::Boots)
            .with_price(60),

        // Accessories
        Item::new("health-amulet", "Health Amulet", "An amulet that increases maximum health.", ItemKind::Armor, 20)
            .with_effect(StatKind::Health, 15)
            .with_slot(EquipSlot::Accessory)
            .with_price(75),
        Item::new("mana-ring", "Mana Ring", "A ring that deepens the wearer's mana pool.", ItemKind::Armor, 20)
            .with_effect(StatKind::Mana, 15)
            .with_slot(EquipSlot::Accessory)
            .with_price(75),

        // Consumables
        Item::new("health-potion", "Health Potion", "Restores 30 health points.", ItemKind::Consumable, 10)
            .with_effect(StatKind::Health, 30)
            .with_price(20),
        Item::new("mana-potion", "Mana Potion", "Restores 20 mana points.", ItemKind::Consumable, 10)
            .with_effect(StatKind::Mana, 20)
            .with_price(20),
        Item::new("greater-health-potion", "Greater Health Potion", "Restores 75 health points.", ItemKind::Consumable, 25)
            .with_effect(StatKind::Health, 75)
            .with_price(55),
        Item::new("greater-mana-potion", "Greater Mana Potion", "Restores 50 mana points.", ItemKind::Consumable, 25)
            .with_effect(StatKind::Mana, 50)
            .with_price(55),

        // Materials
        Item::new("slime-goo", "Slime Goo", "A sticky substance collected from slimes.", ItemKind::Material, 2)
            .with_price(5),
        Item::new("goblin-charm", "Goblin Charm", "A crude trinket of bone and string.", ItemKind::Material, 3)
            .with_price(6),
        Item::new("wolf-pelt", "Wolf Pelt", "A thick grey pelt, still warm.", ItemKind::Material, 4)
            .with_price(8),
        Item::new("bone-shard", "Bone Shard", "A splinter of ancient bone.", ItemKind::Material, 3)
            .with_price(6),
        Item::new("orc-tusk", "Orc Tusk", "A broken tusk taken as a trophy.", ItemKind::Material, 6)
            .with_price(12),

        // Scrolls (for learning spells)
        Item::new("fireball-scroll", "Fireball Scroll", "A scroll containing the Fireball spell.", ItemKind::Scroll, 30)
            .with_price(100)
            .with_spell("fireball"),
        Item::new("frost-scroll", "Frost Spike Scroll", "A scroll containing the Frost Spike spell.", ItemKind::Scroll, 25)
            .with_price(80)
            .with_spell("frost"),
        Item::new("heal-scroll", "Heal Scroll", "A scroll containing the Heal spell.", ItemKind::Scroll, 25)
            .with_price(90)
            .with_spell("heal"),
    ];
}

/// Get an item by id.
pub fn get_item(id: &str) -> Option<Item> {
    ITEMS.iter().find(|item| item.id == id).cloned()
}

/// All items of a kind.
pub fn items_by_kind(kind: ItemKind) -> Vec<Item> {
    ITEMS.iter().filter(|item| item.kind == kind).cloned().collect()
}

/// All items that equip into a slot.
pub fn items_by_slot(slot: EquipSlot) -> Vec<Item> {
    ITEMS
        .iter()
        .filter(|item| item.equip_slot == Some(slot))
        .cloned()
        .collect()
}

/// Draw up to `count` distinct items at random from a list.
pub fn random_items<R: Rng>(items: &[Item], count: usize, rng: &mut R) -> Vec<Item> {
    items.choose_multiple(rng, count).cloned().collect()
}

/// Items a fresh character starts with: a class weapon and a couple of
/// health potions.
pub fn starter_items(class: Class) -> Vec<Item> {
    let weapon = match class {
        Class::Ranger => "hunting-bow",
        _ => "wooden-sword",
    };

    let mut items = Vec::new();
    if let Some(item) = get_item(weapon) {
        items.push(item);
    }
    if let Some(potion) = get_item("health-potion") {
        items.push(potion.clone());
        items.push(potion);
    }
    items
}

/// Roll loot for a defeated monster template. Every monster has a 30%
/// chance of dropping nothing at all, then rolls its own drop table.
pub fn roll_loot<R: Rng>(template_id: &str, rng: &mut R) -> Vec<Item> {
    let mut loot = Vec::new();

    if rng.gen_bool(0.3) {
        return loot;
    }

    let mut roll = |chance: f64, id: &str, loot: &mut Vec<Item>| {
        if rng.gen_bool(chance) {
            if let Some(item) = get_item(id) {
                loot.push(item);
            }
        }
    };

    match template_id {
        "slime" => {
            roll(0.7, "slime-goo", &mut loot);
            roll(0.1, "health-potion", &mut loot);
        }
        "goblin" => {
            roll(0.6, "goblin-charm", &mut loot);
            roll(0.1, "health-potion", &mut loot);
        }
        "wolf" => {
            roll(0.65, "wolf-pelt", &mut loot);
            roll(0.1, "health-potion", &mut loot);
        }
        "skeleton" => {
            roll(0.6, "bone-shard", &mut loot);
            roll(0.15, "mana-potion", &mut loot);
        }
        "orc" => {
            roll(0.6, "orc-tusk", &mut loot);
            roll(0.15, "greater-health-potion", &mut loot);
        }
        _ => {}
    }

    loot
}

/// Generate a fresh shop inventory: a random draw from each category.
pub fn shop_stock<R: Rng>(rng: &mut R) -> Vec<Item> {
    let mut stock = Vec::new();
    stock.extend(random_items(&items_by_kind(ItemKind::Weapon), 3, rng));
    stock.extend(random_items(&items_by_slot(EquipSlot::Armor), 2, rng));
    stock.extend(random_items(&items_by_slot(EquipSlot::Helmet), 2, rng));
    stock.extend(random_items(&items_by_slot(EquipSlot::Boots), 2, rng));
    stock.extend(random_items(&items_by_slot(EquipSlot::Accessory), 2, rng));
    stock.extend(random_items(&items_by_kind(ItemKind::Consumable), 4, rng));
    stock.extend(random_items(&items_by_kind(ItemKind::Scroll), 2, rng));
    stock
}
