use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Row classes the salary summary grid uses. Plain and alternating rows are
/// both data rows.
pub const ROW_CLASSES: [&str; 2] = ["RSGrid", "ARSGrid"];

/// Cells in a summary row: a label, the earlier month, the later month.
pub const SUMMARY_ROW_CELLS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryPair {
    pub earlier: u64,
    pub later: u64,
}

/// Reads the salary summary grid out of the portal's HTML.
pub struct SummaryScraper {
    row_selectors: Vec<Selector>,
    cell_selector: Selector,
    number_regex: Regex,
}

impl Default for SummaryScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryScraper {
    pub fn new() -> Self {
        let row_selectors = ROW_CLASSES
            .iter()
            .map(|class| Selector::parse(&format!(r#"tr[class="{}"]"#, class)).unwrap())
            .collect();

        SummaryScraper {
            row_selectors,
            cell_selector: Selector::parse("td").unwrap(),
            number_regex: Regex::new(r"\d+").unwrap(),
        }
    }

    /// Text of every cell in every data row. Rows of the first class come
    /// before rows of the second, each in document order.
    pub fn rows(&self, html: &str) -> Vec<Vec<String>> {
        let document = Html::parse_document(html);

        self.row_selectors
            .iter()
            .flat_map(|selector| document.select(selector).collect::<Vec<_>>())
            .map(|row| self.cells(row))
            .collect()
    }

    fn cells(&self, row: ElementRef<'_>) -> Vec<String> {
        row.select(&self.cell_selector)
            .map(|cell| cell.text().collect::<String>())
            .collect()
    }

    /// First run of digits in a cell. Separators end the run, so `12,345` reads as 12.
    pub fn extract_number(&self, text: &str) -> Option<u64> {
        self.number_regex
            .find(text)
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Salaries from the first data row, which must hold exactly three cells.
    /// `None` when the grid is missing, malformed, or a figure has no digits.
    pub fn salary_pair(&self, html: &str) -> Option<SalaryPair> {
        let rows = self.rows(html);
        let first = rows.first()?;

        if first.len() != SUMMARY_ROW_CELLS {
            return None;
        }

        Some(SalaryPair {
            earlier: self.extract_number(&first[1])?,
            later: self.extract_number(&first[2])?,
        })
    }
}
