pub mod u501_gestao_ordens;
