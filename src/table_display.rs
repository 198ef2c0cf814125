use crate::institution::Institution;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

/// Build the results table printed by `--search`
pub fn institutions_table(institutions: &[Institution]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Domains").add_attribute(Attribute::Bold),
    ]);

    for (i, institution) in institutions.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            institution.name.clone(),
            institution.domains.join(", "),
        ]);
    }
    table
}

pub fn display_institutions(institutions: &[Institution]) {
    use crossterm::style::Stylize;

    if institutions.is_empty() {
        println!("{}", "No colleges found.".yellow());
        return;
    }

    println!("{}", institutions_table(institutions));
    println!("\n{}", format!("{} colleges returned", institutions.len()).green());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_follow_input_order() {
        let institutions = vec![
            Institution::new("Massachusetts Institute of Technology", vec!["mit.edu".to_string()]),
            Institution::new(
                "University of Cambridge",
                vec!["cam.ac.uk".to_string(), "cambridge.ac.uk".to_string()],
            ),
        ];

        let rendered = institutions_table(&institutions).to_string();
        let mit = rendered.find("Massachusetts").unwrap();
        let cam = rendered.find("Cambridge").unwrap();
        assert!(mit < cam);
        assert!(rendered.contains("cam.ac.uk, cambridge.ac.uk"));
    }
}
