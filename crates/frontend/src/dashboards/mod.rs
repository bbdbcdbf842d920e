pub mod d400_consumo_excipientes;

pub use d400_consumo_excipientes::ui::ConsumoExcipientesChart;
