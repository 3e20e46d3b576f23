pub mod bookings;
pub mod calendar;
pub mod customers;
pub mod dashboard;
pub mod login;
pub mod reports;
pub mod settings;
pub mod trainers;
pub mod users;

pub use bookings::BookingsPage;
pub use calendar::CalendarPage;
pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use reports::ReportsPage;
pub use settings::SettingsPage;
pub use trainers::TrainersPage;
pub use users::UsersPage;
