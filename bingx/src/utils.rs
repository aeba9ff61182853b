/// Normalize a trading pair to the `BTC-USDT` form: uppercase, `/` becomes
/// `-`, and a bare `BTCUSDT` gets its quote split off.
pub fn normalize_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase().replace('/', "-");
    if upper.contains('-') {
        return upper;
    }
    match upper.strip_suffix("USDT") {
        Some(base) if !base.is_empty() => format!("{base}-USDT"),
        _ => upper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol_bare_pair() {
        assert_eq!(normalize_symbol("BTCUSDT"), "BTC-USDT");
        assert_eq!(normalize_symbol("1000PEPEUSDT"), "1000PEPE-USDT");
    }

    #[test]
    fn test_normalize_symbol_lowercase_and_slash() {
        assert_eq!(normalize_symbol("eth/usdt"), "ETH-USDT");
        assert_eq!(normalize_symbol(" solusdt "), "SOL-USDT");
    }

    #[test]
    fn test_normalize_symbol_already_normalized() {
        assert_eq!(normalize_symbol("BTC-USDT"), "BTC-USDT");
    }

    #[test]
    fn test_normalize_symbol_other_quote_untouched() {
        assert_eq!(normalize_symbol("BTCUSDC"), "BTCUSDC");
        assert_eq!(normalize_symbol("USDT"), "USDT");
    }
}
