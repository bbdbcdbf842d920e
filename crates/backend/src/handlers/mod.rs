pub mod p900_receitas;
