use crate::models::BrowsePage;
use crate::table::SortDirection;
use crate::ui::layout::calculate_table_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table},
    Frame,
};

pub fn draw_table(f: &mut Frame, page: &BrowsePage) {
    let layout = calculate_table_chunks(f.area());
    let slice = page.view.derive();

    let header = Paragraph::new(page.title.as_str())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let search_text = if page.search_input.is_empty() {
        "[Type to search...]".to_string()
    } else {
        page.search_input.clone()
    };
    let search_title = if page.search_pending_since.is_some() {
        "Search (typing)"
    } else {
        "Search"
    };
    let search = Paragraph::new(search_text)
        .block(Block::default().borders(Borders::ALL).title(search_title));
    f.render_widget(search, layout.search_area);

    let header_cells: Vec<Cell> = page
        .view
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let indicator = match page.view.sort() {
                Some((key, SortDirection::Ascending)) if key == column.key => " ▲",
                Some((key, SortDirection::Descending)) if key == column.key => " ▼",
                _ => "",
            };
            let style = if i == page.selected_column {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Cell::from(format!("{}{}", column.label, indicator)).style(style)
        })
        .collect();

    let rows: Vec<TableRow> = slice
        .visible_rows
        .iter()
        .map(|row| {
            let cells: Vec<Cell> = page
                .view
                .columns()
                .iter()
                .map(|column| {
                    let text = row
                        .get(&column.key)
                        .map(|v| v.display())
                        .unwrap_or_default();
                    Cell::from(truncate_string(&text, 28))
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    let column_count = page.view.columns().len().max(1);
    let widths = vec![Constraint::Ratio(1, column_count as u32); column_count];
    let table = Table::new(rows, widths)
        .header(TableRow::new(header_cells).bottom_margin(1))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(table, layout.table_area);

    let footer = Paragraph::new(format!(
        "Page {} of {}  ({} records)",
        slice.page, slice.total_pages, slice.total_count
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, layout.footer_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![Line::from(vec![
        Span::styled("←/→", key_style),
        Span::from(" Column  "),
        Span::styled("Enter", key_style),
        Span::from(" Sort  "),
        Span::styled("↑/↓", key_style),
        Span::from(" Page  "),
        Span::styled("Esc", key_style),
        Span::from(" Menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
