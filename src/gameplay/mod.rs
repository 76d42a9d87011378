pub mod home_run;
pub mod scene;
