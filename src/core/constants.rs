// Character creation
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_GOLD: u64 = 100;

// Class base stats: (max_health, strength, magic)
pub const WARRIOR_BASE_STATS: (u32, u32, u32) = (120, 15, 5);
pub const MAGE_BASE_STATS: (u32, u32, u32) = (80, 8, 20);
pub const ROGUE_BASE_STATS: (u32, u32, u32) = (90, 12, 10);
pub const CLERIC_BASE_STATS: (u32, u32, u32) = (100, 10, 15);

// Per-level growth
pub const LEVEL_UP_MAX_HEALTH: u32 = 10;
pub const LEVEL_UP_STRENGTH: u32 = 2;
pub const LEVEL_UP_MAGIC: u32 = 2;

// Experience curve: threshold to leave a level is level * XP_PER_LEVEL
pub const XP_PER_LEVEL: u64 = 100;

// Enemy table: (max_health, strength, magic, experience_reward, gold_reward)
pub const GOBLIN_STATS: (u32, u32, u32, u64, u64) = (50, 8, 2, 25, 10);
pub const ORC_STATS: (u32, u32, u32, u64, u64) = (80, 12, 5, 50, 25);
pub const DRAGON_STATS: (u32, u32, u32, u64, u64) = (200, 25, 15, 200, 100);

// Highest character level that still meets goblins / orcs
pub const GOBLIN_MAX_LEVEL: u32 = 2;
pub const ORC_MAX_LEVEL: u32 = 5;

// Combat
pub const MIN_DAMAGE: u32 = 1;
pub const MITIGATION_DIVISOR: u32 = 4;
pub const ESCAPE_CHANCE: f64 = 0.5;

// Abilities
pub const POWER_STRIKE_MULTIPLIER: u32 = 2;
pub const FIREBALL_MULTIPLIER: u32 = 2;
pub const CRITICAL_STRIKE_MULTIPLIER: u32 = 3;
pub const CRITICAL_STRIKE_CHANCE: f64 = 0.5;
pub const CLERIC_HEAL_AMOUNT: u32 = 30;
pub const ABILITY_COOLDOWN_TURNS: u32 = 2;

// Inventory and shop
pub const MAX_INVENTORY_SIZE: usize = 20;
pub const SELL_PRICE_DIVISOR: u64 = 2;

// Save files
pub const SAVE_FILE_SUFFIX: &str = "_save.txt";
pub const MAX_NAME_LENGTH: usize = 16;

// Game data files
pub const QUESTS_FILE_NAME: &str = "quests.txt";
pub const ITEMS_FILE_NAME: &str = "items.txt";
pub const NO_PREREQUISITE: &str = "NONE";
