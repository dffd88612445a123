use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::domain::{ResultRecord, SubjectRecord};

/// Tables the results site renders once a roll/reg lookup succeeds.
pub const RESULT_TABLE_SELECTOR: &str = "table.black12";

static RESULT_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(RESULT_TABLE_SELECTOR).expect("valid table selector"));
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid tr selector"));
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid td selector"));

/// Rendered result page. Knows the site's markup, nothing about the browser.
pub struct ResultPage {
    document: Html,
}

impl ResultPage {
    pub fn parse(html: &str) -> Self {
        ResultPage {
            document: Html::parse_document(html),
        }
    }

    /// Text of the first `<td>` that follows a cell labelled exactly `label`.
    /// Label cells without a neighbour are passed over. Empty when none match.
    pub fn labeled_value(&self, label: &str) -> String {
        self.document
            .select(&TD)
            .filter(|td| first_text_node(td).is_some_and(|text| normalize_space(text) == label))
            .find_map(|td| {
                td.next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|sibling| sibling.value().name() == "td")
            })
            .map(|td| cell_text(&td))
            .unwrap_or_default()
    }

    /// Rows of the second result table, header skipped. Rows with fewer than
    /// three cells are dropped, cells past the third are ignored.
    pub fn subjects(&self) -> Vec<SubjectRecord> {
        let Some(table) = self.document.select(&RESULT_TABLE).nth(1) else {
            return vec![];
        };

        table
            .select(&TR)
            .skip(1)
            .filter_map(|row| {
                let cells: Vec<String> = row.select(&TD).map(|td| cell_text(&td)).collect();
                match cells.as_slice() {
                    [code, subject, grade, ..] => Some(SubjectRecord {
                        code: code.clone(),
                        subject: subject.clone(),
                        grade: grade.clone(),
                    }),
                    _ => None,
                }
            })
            .collect()
    }

    pub fn into_record(self) -> ResultRecord {
        ResultRecord {
            name: self.labeled_value("Name"),
            gpa: self.labeled_value("GPA"),
            result: self.labeled_value("Result"),
            subjects: self.subjects(),
        }
    }
}

pub fn extract_result(html: &str) -> ResultRecord {
    ResultPage::parse(html).into_record()
}

fn first_text_node<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element
        .children()
        .find_map(|node| node.value().as_text().map(|text| &**text))
}

// XPath normalize-space: only space, tab, CR and LF count as whitespace.
fn normalize_space(s: &str) -> String {
    s.split([' ', '\t', '\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

// Cells render with collapsed whitespace, so a name wrapped over lines reads as one line.
fn cell_text(element: &ElementRef) -> String {
    normalize_space(element.text().collect::<String>().trim())
}
