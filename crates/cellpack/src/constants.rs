/// Grid capacity accepted by scenario files
pub const MIN_CAPACITY: usize = 1;
pub const MAX_CAPACITY: usize = 4096; // 64 x 64 cells

/// Default scenario file for the CLI
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Text rendering marks
pub const FREE_MARK: char = '.';
pub const CENTER_MARK: char = '*';
pub const TOP_RIGHT_MARK: char = '^';

/// Labels handed out to placed items in the text map, in order of first appearance
pub const ITEM_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
/// Label used once `ITEM_LABELS` runs out
pub const OVERFLOW_LABEL: char = '#';
