//! Investment display formatting

use tabled::Tabled;

use crate::models::Investment;
use crate::services::investment::Portfolio;

use super::render_table;

#[derive(Tabled)]
struct InvestmentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Invested")]
    invested: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Gain")]
    gain: String,
    #[tabled(rename = "Return")]
    return_percent: String,
}

fn format_return(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{:+.2}%", p),
        None => "-".to_string(),
    }
}

pub fn format_investment_list(investments: &[Investment]) -> String {
    if investments.is_empty() {
        return "No investments found.".to_string();
    }

    let rows = investments.iter().map(|i| InvestmentRow {
        name: i.name.clone(),
        kind: i.investment_type.to_string(),
        symbol: i.symbol.clone().unwrap_or_default(),
        invested: i.invested_amount.to_string(),
        value: i.current_value.to_string(),
        gain: i.gain().to_string(),
        return_percent: format_return(i.return_percent()),
    });

    render_table(rows, &[3, 4, 5, 6])
}

pub fn format_portfolio(portfolio: &Portfolio) -> String {
    format!(
        "Portfolio\n  Invested:      {}\n  Current Value: {}\n  Gain:          {}\n  Return:        {}\n",
        portfolio.invested,
        portfolio.current_value,
        portfolio.gain,
        format_return(portfolio.return_percent)
    )
}
