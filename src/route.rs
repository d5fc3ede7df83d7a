/// Views addressable from the location fragment (`#calendar`, `#plugin-7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Calendar,
    PluginDetail(i64),
}

impl Route {
    /// Unknown fragments, including `plugin-` with a non-numeric id, fall
    /// back to the home view.
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.trim().trim_start_matches('#');
        if fragment == "calendar" {
            return Route::Calendar;
        }
        if let Some(id) = fragment.strip_prefix("plugin-") {
            if let Ok(id) = id.parse::<i64>() {
                return Route::PluginDetail(id);
            }
        }
        Route::Home
    }

    pub fn fragment(self) -> String {
        match self {
            Route::Home => String::new(),
            Route::Calendar => "calendar".to_string(),
            Route::PluginDetail(id) => format!("plugin-{id}"),
        }
    }

    pub fn path(self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Calendar => "/calendar".to_string(),
            Route::PluginDetail(id) => format!("/plugin/{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Anything other than `light` keeps the default dark theme.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}
