//! Chat-text rendering of query results and token balances
//!
//! Pure functions, no I/O. Numbers are rendered with thousands grouping and at
//! most four fractional digits, trailing zeros trimmed.

use crate::balances::TokenWithBalance;
use crate::query::QueryResult;
use serde_json::Value;

/// Format a numeric amount with thousands separators and up to four
/// fractional digits.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Render at fixed precision first, then trim; grouping works on the
    // digit string so very large balances don't need an integer cast.
    let fixed = format!("{:.4}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').expect("fixed-point format");

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    let is_zero = fixed.trim_matches(|c| c == '0' || c == '.').is_empty();
    if value.is_sign_negative() && !is_zero {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Render one token holding as `"<amount> <symbol> (<name>)"`
///
/// The display amount is recomputed from the raw base-unit balance on every
/// call; the balance string is validated upstream by the balance client.
pub fn format_token_balance(token: &TokenWithBalance) -> String {
    let raw: f64 = token.balance.parse().unwrap_or(0.0);
    let amount = raw / 10f64.powi(token.decimals as i32);
    format!("{} {} ({})", format_amount(amount), token.symbol, token.name)
}

/// Render a query result as chat text: the executed SQL, a Markdown pipe
/// table, and a total-row footer when the API reported one.
pub fn format_query_result(result: &QueryResult) -> String {
    let mut out = String::from("📊 Query Results\n\n");
    out.push_str(&format!("🔍 SQL Query:\n{}\n\n", result.sql));

    match (&result.columns, &result.rows) {
        (Some(columns), Some(rows)) => {
            out.push_str("📋 Data:\n");

            let headers: Vec<String> = columns
                .iter()
                .map(|column| {
                    if column.name.is_empty() {
                        "Column".to_string()
                    } else {
                        column.name.clone()
                    }
                })
                .collect();

            let mut lines = vec![format!("| {} |", headers.join(" | "))];
            for row in rows {
                let cells: Vec<String> = row.iter().map(format_cell).collect();
                lines.push(format!("| {} |", cells.join(" | ")));
            }
            out.push_str(&format!("\n{}\n", lines.join("\n")));

            if let Some(total) = result.total_rows.filter(|&total| total > 0) {
                out.push_str(&format!("\n📈 Total Rows: {total}"));
            }
        }
        _ => out.push_str("No data returned from query."),
    }
    out
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Number(number) => number
            .as_f64()
            .map(format_amount)
            .unwrap_or_else(|| number.to_string()),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Column;

    fn usdt(balance: &str, decimals: u32) -> TokenWithBalance {
        TokenWithBalance {
            balance: balance.to_string(),
            symbol: "USDT".to_string(),
            name: "Tether".to_string(),
            contract_address: "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string(),
            decimals,
        }
    }

    #[test]
    fn amount_groups_thousands() {
        assert_eq!(format_amount(21000.5), "21,000.5");
        assert_eq!(format_amount(1234567.0), "1,234,567");
        assert_eq!(format_amount(999.0), "999");
    }

    #[test]
    fn amount_trims_trailing_zeros() {
        assert_eq!(format_amount(20.25), "20.25");
        assert_eq!(format_amount(1.5), "1.5");
        assert_eq!(format_amount(2.0), "2");
    }

    #[test]
    fn amount_caps_fractional_digits_at_four() {
        assert_eq!(format_amount(0.123456), "0.1235");
        assert_eq!(format_amount(0.00001), "0");
    }

    #[test]
    fn amount_handles_negatives() {
        assert_eq!(format_amount(-21000.5), "-21,000.5");
        assert_eq!(format_amount(-0.00001), "0");
    }

    #[test]
    fn token_balance_scales_by_decimals() {
        assert_eq!(format_token_balance(&usdt("2025000000", 8)), "20.25 USDT (Tether)");
        assert_eq!(format_token_balance(&usdt("1000000", 6)), "1 USDT (Tether)");
    }

    #[test]
    fn token_balance_groups_large_amounts() {
        assert_eq!(
            format_token_balance(&usdt("1234567000000", 6)),
            "1,234,567 USDT (Tether)"
        );
    }

    #[test]
    fn query_result_renders_table_and_footer() {
        let result = QueryResult {
            sql: "SELECT avg_gas FROM blocks".to_string(),
            columns: Some(vec![Column {
                name: "avg_gas".to_string(),
            }]),
            rows: Some(vec![vec![serde_json::json!(21000.5)]]),
            total_rows: Some(1),
        };
        let text = format_query_result(&result);
        assert!(text.contains("SELECT avg_gas FROM blocks"));
        assert!(text.contains("| avg_gas |"));
        assert!(text.contains("| 21,000.5 |"));
        assert!(text.contains("📈 Total Rows: 1"));
    }

    #[test]
    fn query_result_renders_mixed_cells() {
        let result = QueryResult {
            sql: "SELECT 1".to_string(),
            columns: Some(vec![
                Column {
                    name: "hash".to_string(),
                },
                Column {
                    name: String::new(),
                },
            ]),
            rows: Some(vec![vec![
                serde_json::json!("0xabc"),
                serde_json::Value::Null,
            ]]),
            total_rows: None,
        };
        let text = format_query_result(&result);
        assert!(text.contains("| hash | Column |"));
        assert!(text.contains("| 0xabc | null |"));
        assert!(!text.contains("Total Rows"));
    }

    #[test]
    fn query_result_without_data_says_so() {
        let result = QueryResult {
            sql: "SELECT 1".to_string(),
            columns: None,
            rows: None,
            total_rows: None,
        };
        let text = format_query_result(&result);
        assert!(text.contains("No data returned from query."));
        assert!(!text.contains('|'));
    }
}
