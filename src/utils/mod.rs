// src/utils/mod.rs

pub mod form;
pub mod hash;
pub mod jwt;
