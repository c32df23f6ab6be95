//! Navigation bar

use serde::Serialize;

use crate::model::AppRoute;

/// Application name shown in the navigation bar
pub const APP_NAME: &str = "RefugeeConnect";

/// Display label for a route
pub fn route_label(route: AppRoute) -> &'static str {
    match route {
        AppRoute::Dashboard => "แดชบอร์ด",
        AppRoute::Register => "ลงทะเบียน",
        AppRoute::List => "รายชื่อผู้อพยพ",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub route: AppRoute,
    pub label: &'static str,
    pub active: bool,
}

/// Navigation bar state: which route is current
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navbar {
    current: AppRoute,
}

impl Navbar {
    pub fn new(current: AppRoute) -> Self {
        Self { current }
    }

    pub fn is_active(&self, route: AppRoute) -> bool {
        self.current == route
    }

    /// One item per route, in navigation order
    pub fn items(&self) -> Vec<NavItem> {
        AppRoute::all()
            .iter()
            .map(|&route| NavItem {
                route,
                label: route_label(route),
                active: self.is_active(route),
            })
            .collect()
    }
}
