//! Quantity input validation.
//!
//! Edit-dialog quantities arrive as free text. Invalid input is rejected
//! explicitly instead of being coerced to NaN and silently summed.

/// Parse a user-typed quantity in kilograms.
///
/// Accepts a decimal comma ("2,5") by normalizing it to a dot. Rejects
/// empty input, non-numeric text, negative and non-finite values.
pub fn parse_quantidade(texto: &str) -> Result<f64, String> {
    let normalizado = texto.trim().replace(',', ".");
    if normalizado.is_empty() {
        return Err("Quantidade não informada".to_string());
    }
    let valor: f64 = normalizado
        .parse()
        .map_err(|_| format!("Quantidade inválida: \"{}\"", texto.trim()))?;
    if !valor.is_finite() {
        return Err(format!("Quantidade inválida: \"{}\"", texto.trim()));
    }
    if valor < 0.0 {
        return Err("Quantidade não pode ser negativa".to_string());
    }
    Ok(valor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_ponto_e_virgula_decimal() {
        assert_eq!(parse_quantidade("2.5"), Ok(2.5));
        assert_eq!(parse_quantidade("2,5"), Ok(2.5));
        assert_eq!(parse_quantidade(" 10 "), Ok(10.0));
        assert_eq!(parse_quantidade("0"), Ok(0.0));
    }

    #[test]
    fn rejeita_entrada_invalida() {
        assert!(parse_quantidade("").is_err());
        assert!(parse_quantidade("   ").is_err());
        assert!(parse_quantidade("abc").is_err());
        assert!(parse_quantidade("1.2.3").is_err());
        assert!(parse_quantidade("-1").is_err());
        assert!(parse_quantidade("inf").is_err());
        assert!(parse_quantidade("NaN").is_err());
    }
}
