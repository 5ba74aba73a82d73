pub mod cart_panel;
pub mod gem;
pub mod layout;
pub mod navbar;
pub mod popup;
pub mod smooth_scroll;
pub mod storefront;
pub mod theme;
