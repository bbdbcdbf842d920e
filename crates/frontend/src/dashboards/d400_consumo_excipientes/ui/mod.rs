pub mod chart;

pub use chart::ConsumoExcipientesChart;
