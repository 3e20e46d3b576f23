pub mod booking_modal;
pub mod chart;
pub mod customer_modal;
pub mod layout;
pub mod legend;
pub mod modal;
pub mod stat_card;
pub mod time_grid;
pub mod trainer_modal;
pub mod user_modal;
