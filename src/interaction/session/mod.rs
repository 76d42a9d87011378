pub mod auto_close;
pub mod config_hot_reload;
pub mod enter_vr_panel;
