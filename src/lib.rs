//! Formal-employment rate of Brazil's employed population, by education,
//! sex and race/color, from PNAD Contínua fixed-width microdata.

pub mod data;
pub mod indicator;
pub mod pipeline;
pub mod report;
