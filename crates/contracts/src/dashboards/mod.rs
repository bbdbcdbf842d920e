pub mod d400_consumo_excipientes;
