/// Source tokens as they appear in the published datasets.
pub const CURSEFORGE_SOURCE: &str = "curse";
pub const TUKUI_SOURCE: &str = "tukui";
pub const WOWINTERFACE_SOURCE: &str = "wowi";

/// Human-facing source names used in logs, errors and metric labels.
pub const CURSEFORGE_NAME: &str = "curseforge";
pub const TUKUI_NAME: &str = "tukui";
pub const WOWINTERFACE_NAME: &str = "wowinterface";

pub const USER_AGENT: &str = "addon-catalogue (https://github.com/layday/instascrape)";

pub const CURSEFORGE_SEARCH_URL: &str = "https://addons-ecs.forgesvc.net/api/v2/addon/search";
pub const CURSEFORGE_PAGE_SIZE: usize = 1000;
pub const TUKUI_RETAIL_URL: &str = "https://www.tukui.org/api.php?addons=all";
pub const TUKUI_CLASSIC_URL: &str = "https://www.tukui.org/api.php?classic-addons=all";
pub const WOWINTERFACE_FILELIST_URL: &str = "https://api.mmoui.com/v3/game/WOW/filelist.json";

/// Game version prefix of the current retail client line.
///
/// Must be bumped whenever the retail client moves to a new major version.
pub const RETAIL_VERSION_PREFIX: &str = "8.";
pub const CURSEFORGE_CLASSIC_FLAVOR: &str = "wow_classic";
pub const WOWINTERFACE_CLASSIC_NAME: &str = "WoW Classic";

pub const SLUGS_ARTIFACT: &str = "curseforge-slugs-v2";
pub const FOLDERS_ARTIFACT: &str = "combined-folders";
pub const NAMES_ARTIFACT: &str = "combined-names-v2";

pub const PRETTY_SUFFIX: &str = ".json";
pub const COMPACT_SUFFIX: &str = ".compact.json";

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPOSITORY: &str = "layday/instascrape";
pub const DEFAULT_BRANCH: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const GITHUB_TOKEN_ENV: &str = "ADDON_CATALOGUE_GITHUB_TOKEN";
pub const PUBLISH_TARGET_ENV: &str = "ADDON_CATALOGUE_PUBLISH_TARGET";
pub const OUTPUT_DIR_ENV: &str = "ADDON_CATALOGUE_OUTPUT_DIR";
pub const METRICS_ADDR_ENV: &str = "ADDON_CATALOGUE_METRICS_ADDR";

/// File names used when raw catalogues are saved to or read from disk.
pub const CURSEFORGE_DUMP: &str = "curseforge.json";
pub const TUKUI_RETAIL_DUMP: &str = "tukui-retail.json";
pub const TUKUI_CLASSIC_DUMP: &str = "tukui-classic.json";
pub const WOWINTERFACE_DUMP: &str = "wowinterface.json";
