// src/handlers/mod.rs

pub mod answer;
pub mod auth;
pub mod pages;
pub mod question;
pub mod quiz;
