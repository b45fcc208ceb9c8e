pub mod alert;
pub mod confirm_dialog;
pub mod empty_state;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod month_picker;
pub mod popup;
pub mod screen_title;
pub mod status_badge;
pub mod student_card;
pub mod text_input;
