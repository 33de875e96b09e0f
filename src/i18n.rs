//! User facing strings
//!
//! Languages are named the way Steam names them (`english`, `schinese`,
//! ...). Anything without a translation falls back to English.

use tracing::debug;

/// Translated UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub app_name: &'static str,
    pub current_boot: &'static str,
    pub next_boot: &'static str,
    pub follow_boot_order: &'static str,
    pub unknown: &'static str,
    pub refresh: &'static str,
    pub loading: &'static str,
    pub boot_order_title: &'static str,
    pub next_boot_button: &'static str,
    pub error: &'static str,
    pub retry: &'static str,
    pub success: &'static str,
    pub boot_order_save_failed: &'static str,
    pub boot_next_set_failed: &'static str,
    pub parse_error: &'static str,
    pub get_boot_info_failed: &'static str,
}

const EN: Messages = Messages {
    app_name: "EFI Boot Manager",
    current_boot: "Current Boot",
    next_boot: "Next Boot",
    follow_boot_order: "Follow BootOrder",
    unknown: "Unknown",
    refresh: "Refresh",
    loading: "Loading...",
    boot_order_title: "Boot Order",
    next_boot_button: "Next Boot",
    error: "Error",
    retry: "Retry",
    success: "Success",
    boot_order_save_failed: "Failed to save boot order",
    boot_next_set_failed: "Failed to set next boot",
    parse_error: "Unable to parse boot information",
    get_boot_info_failed: "Failed to get boot information",
};

const ZH_CN: Messages = Messages {
    app_name: "EFI 启动管理器",
    current_boot: "当前启动",
    next_boot: "下次启动",
    follow_boot_order: "跟随 BootOrder",
    unknown: "未知",
    refresh: "刷新",
    loading: "加载中...",
    boot_order_title: "启动项顺序",
    next_boot_button: "下次启动",
    error: "错误",
    retry: "重试",
    success: "成功",
    boot_order_save_failed: "保存启动顺序失败",
    boot_next_set_failed: "设置下次启动失败",
    parse_error: "无法解析启动信息",
    get_boot_info_failed: "获取启动信息失败",
};

/// Locales with a string table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    SimplifiedChinese,
}

impl Locale {
    /// Map a Steam language name to a locale
    ///
    /// Steam languages without a translation (german, japanese, ...) and
    /// unknown names return `None`.
    pub fn from_steam_language(name: &str) -> Option<Locale> {
        match name.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Locale::English),
            // tchinese has no table of its own and uses the simplified one
            "schinese" | "tchinese" | "zh-cn" => Some(Locale::SimplifiedChinese),
            _ => None,
        }
    }

    /// Map a POSIX locale such as `zh_CN.UTF-8`
    pub fn from_posix(value: &str) -> Option<Locale> {
        let lang = value.split(['.', '@']).next().unwrap_or_default();
        match lang {
            "C" | "POSIX" => Some(Locale::English),
            l if l.starts_with("en") => Some(Locale::English),
            l if l.starts_with("zh") => Some(Locale::SimplifiedChinese),
            _ => None,
        }
    }

    /// Pick a locale from the configured language, then `LANG`
    ///
    /// Never fails: an unusable setting falls back to English.
    pub fn detect(configured: Option<&str>) -> Locale {
        if let Some(name) = configured {
            return Locale::from_steam_language(name).unwrap_or_else(|| {
                debug!("No translation for language '{}', using English", name);
                Locale::English
            });
        }

        match std::env::var("LANG") {
            Ok(value) => Locale::from_posix(&value).unwrap_or_else(|| {
                debug!("No translation for LANG={}, using English", value);
                Locale::English
            }),
            Err(_) => Locale::English,
        }
    }

    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::English => &EN,
            Locale::SimplifiedChinese => &ZH_CN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steam_language_mapping() {
        assert_eq!(Locale::from_steam_language("english"), Some(Locale::English));
        assert_eq!(
            Locale::from_steam_language("schinese"),
            Some(Locale::SimplifiedChinese)
        );
        assert_eq!(
            Locale::from_steam_language("tchinese"),
            Some(Locale::SimplifiedChinese)
        );
        assert_eq!(Locale::from_steam_language("german"), None);
    }

    #[test]
    fn test_unknown_configured_language_falls_back() {
        assert_eq!(Locale::detect(Some("klingon")), Locale::English);
        assert_eq!(Locale::detect(Some("japanese")), Locale::English);
        assert_eq!(Locale::detect(Some("schinese")), Locale::SimplifiedChinese);
    }

    #[test]
    fn test_posix_locale() {
        assert_eq!(Locale::from_posix("zh_CN.UTF-8"), Some(Locale::SimplifiedChinese));
        assert_eq!(Locale::from_posix("en_US.UTF-8"), Some(Locale::English));
        assert_eq!(Locale::from_posix("C"), Some(Locale::English));
        assert_eq!(Locale::from_posix("de_DE.UTF-8"), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Locale::English.messages().follow_boot_order, "Follow BootOrder");
        assert_eq!(Locale::SimplifiedChinese.messages().retry, "重试");
    }
}
