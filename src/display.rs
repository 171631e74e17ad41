use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Product;

/// Formats a price in Brazilian real, e.g. `R$ 1.234,56`.
///
/// Always two decimal places, dot-separated thousands groups, comma as
/// the decimal separator. Midpoints round away from zero.
pub fn format_brl(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let formatted = format!("R$ {},{}", grouped, frac_part);
    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Renders the product table shown by the `list` command.
pub fn product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found".to_string();
    }

    let rows: Vec<[String; 4]> = products
        .iter()
        .map(|p| {
            let stock = if p.stock_quantity == 0 {
                "0 (out of stock)".to_string()
            } else {
                p.stock_quantity.to_string()
            };
            [
                p.id.to_string(),
                p.name.clone(),
                format_brl(p.price),
                stock,
            ]
        })
        .collect();

    let headers = ["ID", "Name", "Price", "Stock"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    render_row(&mut out, &headers.map(str::to_string), &widths);
    for row in &rows {
        out.push('\n');
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    // Name is left-aligned, numeric columns right-aligned
    out.push_str(&format!(
        "{:>id$}  {:<name$}  {:>price$}  {:>stock$}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        id = widths[0],
        name = widths[1],
        price = widths[2],
        stock = widths[3],
    ));
}
