//! Role based page gating, evaluated once per navigation instead of in every
//! page body.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trainer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Trainer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Trainer => "trainer",
        }
    }

    pub fn from_value(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "trainer" => Some(Role::Trainer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Trainer => "Trainer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top level pages of the manager, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Calendar,
    Bookings,
    Customers,
    Trainers,
    Reports,
    Settings,
    Users,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Dashboard,
        Page::Calendar,
        Page::Bookings,
        Page::Customers,
        Page::Trainers,
        Page::Reports,
        Page::Settings,
        Page::Users,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Calendar => "Calendar",
            Page::Bookings => "Bookings",
            Page::Customers => "Customers",
            Page::Trainers => "Trainers",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
            Page::Users => "Users",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Dashboard => "📊",
            Page::Calendar => "📅",
            Page::Bookings => "📖",
            Page::Customers => "👥",
            Page::Trainers => "🧑‍🏫",
            Page::Reports => "📈",
            Page::Settings => "⚙️",
            Page::Users => "🛡️",
        }
    }

    /// `#/calendar` style fragment used for the address bar
    pub fn slug(self) -> &'static str {
        match self {
            Page::Dashboard => "",
            Page::Calendar => "calendar",
            Page::Bookings => "bookings",
            Page::Customers => "customers",
            Page::Trainers => "trainers",
            Page::Reports => "reports",
            Page::Settings => "settings",
            Page::Users => "users",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        let slug = slug.trim_start_matches('#').trim_matches('/');
        Page::ALL.into_iter().find(|page| page.slug() == slug)
    }

    fn admin_only(self) -> bool {
        !matches!(self, Page::Calendar | Page::Reports)
    }
}

/// Tabs of the reports page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTab {
    Monthly,
    Subscriptions,
    TrainerBilling,
}

impl ReportTab {
    pub fn label(self) -> &'static str {
        match self {
            ReportTab::Monthly => "Monthly Report",
            ReportTab::Subscriptions => "ABO Report",
            ReportTab::TrainerBilling => "Trainer Billing",
        }
    }
}

/// What the signed-in user may see and do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    role: Role,
}

impl Access {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can_view(&self, page: Page) -> bool {
        self.is_admin() || !page.admin_only()
    }

    /// Create, edit and delete bookings from the calendar
    pub fn can_edit_bookings(&self) -> bool {
        self.is_admin()
    }

    pub fn can_download_reports(&self) -> bool {
        self.is_admin()
    }

    /// Landing page after sign-in
    pub fn home(&self) -> Page {
        if self.is_admin() {
            Page::Dashboard
        } else {
            Page::Calendar
        }
    }

    /// The page actually shown for a requested one
    pub fn resolve(&self, requested: Page) -> Page {
        if self.can_view(requested) {
            requested
        } else {
            Page::Calendar
        }
    }

    pub fn visible_pages(&self) -> Vec<Page> {
        Page::ALL.into_iter().filter(|page| self.can_view(*page)).collect()
    }

    pub fn report_tabs(&self) -> Vec<ReportTab> {
        if self.is_admin() {
            vec![
                ReportTab::Monthly,
                ReportTab::Subscriptions,
                ReportTab::TrainerBilling,
            ]
        } else {
            vec![ReportTab::TrainerBilling]
        }
    }

    pub fn default_report_tab(&self) -> ReportTab {
        if self.is_admin() {
            ReportTab::Monthly
        } else {
            ReportTab::TrainerBilling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_everything() {
        let access = Access::new(Role::Admin);
        assert_eq!(access.visible_pages(), Page::ALL.to_vec());
        assert_eq!(access.home(), Page::Dashboard);
        assert_eq!(access.resolve(Page::Users), Page::Users);
        assert!(access.can_edit_bookings());
        assert_eq!(access.report_tabs().len(), 3);
    }

    #[test]
    fn test_trainer_is_limited_to_calendar_and_reports() {
        let access = Access::new(Role::Trainer);
        assert_eq!(access.visible_pages(), vec![Page::Calendar, Page::Reports]);
        assert_eq!(access.home(), Page::Calendar);
        assert_eq!(access.resolve(Page::Settings), Page::Calendar);
        assert_eq!(access.resolve(Page::Dashboard), Page::Calendar);
        assert_eq!(access.resolve(Page::Reports), Page::Reports);
        assert!(!access.can_edit_bookings());
        assert_eq!(access.report_tabs(), vec![ReportTab::TrainerBilling]);
        assert_eq!(access.default_report_tab(), ReportTab::TrainerBilling);
    }

    #[test]
    fn test_page_slugs() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("#/bookings"), Some(Page::Bookings));
        assert_eq!(Page::from_slug("#/nowhere"), None);
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::from_value("trainer"), Some(Role::Trainer));
        assert_eq!(Role::from_value("owner"), None);
    }
}
