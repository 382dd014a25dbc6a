//! Optional extensions to the base focus camera controller.

#[cfg(feature = "extension_click_to_focus")]
pub mod click_to_focus;
pub mod navigate_to;
#[cfg(feature = "extension_scroll_hint")]
pub mod scroll_hint;
#[cfg(feature = "extension_target_indicator")]
pub mod target_indicator;
