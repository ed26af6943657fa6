use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::domain::{CMDMode, SVConfig};
use crate::model::{MenuView, Model, UIData};

pub const HEADER_HEIGHT: u16 = 4;
pub const FOOTER_HEIGHT: u16 = 1;
pub const CMDLINE_HEIGHT: u16 = 1;

pub struct TableUI {
    max_column_width: usize,
}

impl TableUI {
    pub fn new(cfg: &SVConfig) -> Self {
        Self {
            max_column_width: cfg.max_column_width,
        }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();
        let [header_area, table_area, footer_area, cmd_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
            Constraint::Length(CMDLINE_HEIGHT),
        ])
        .areas(frame.area());

        self.draw_header(uidata, frame, header_area);
        self.draw_table(uidata, frame, table_area);
        frame.render_widget(
            Paragraph::new(uidata.footer.as_str()).style(Style::new().fg(Color::Gray)),
            footer_area,
        );
        self.draw_cmdline(uidata, frame, cmd_area);

        if uidata.show_popup {
            self.draw_popup(&uidata.popup, frame);
        }
    }

    fn draw_header(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(Line::from(format!(" {} ", uidata.title).bold()).centered())
            .border_set(border::THICK);

        let kpis = Line::from(vec![
            " Total ".into(),
            uidata.kpi_total.as_str().yellow().bold(),
            "   Rows ".into(),
            uidata.kpi_rows.as_str().yellow().bold(),
            "   ".into(),
            uidata.kpi_hint.as_str().italic().dark_gray(),
        ]);
        let mut info: Vec<Span> = vec![Span::from(format!(" {}", uidata.subtitle))];
        for chip in uidata.chips.iter() {
            info.push("  ".into());
            info.push(format!("[{chip}]").black().on_cyan());
        }

        frame.render_widget(
            Paragraph::new(vec![kpis, Line::from(info)]).block(block),
            area,
        );
    }

    fn draw_table(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        if uidata.table.is_empty() {
            frame.render_widget(
                Paragraph::new(uidata.subtitle.as_str()).centered().block(Block::bordered()),
                area,
            );
            return;
        }

        let widths: Vec<Constraint> = uidata
            .table
            .iter()
            .map(|c| Constraint::Length(c.width.min(self.max_column_width) as u16))
            .collect();
        let header = Row::new(
            uidata
                .table
                .iter()
                .map(|c| Cell::from(c.name.as_str()).bold()),
        )
        .style(Style::new().fg(Color::Cyan))
        .height(1);

        let rows = (0..uidata.nrows).map(|ridx| {
            Row::new(uidata.table.iter().map(|c| {
                let cell = Cell::from(c.data[ridx].as_str());
                if c.numeric[ridx] {
                    cell.fg(Color::LightGreen)
                } else {
                    cell
                }
            }))
        });

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(Block::bordered())
            .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED))
            .cell_highlight_style(Style::new().fg(Color::Black).bg(Color::Yellow));

        let mut state = TableState::default()
            .with_selected(Some(uidata.selected_row))
            .with_selected_column(Some(uidata.selected_column));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_cmdline(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        if uidata.active_cmdinput {
            let prompt = match uidata.cmd_mode {
                Some(CMDMode::Search) => "Search: ",
                Some(CMDMode::ValueFilter) => "Filter values: ",
                None => ": ",
            };
            let line = Line::from(vec![prompt.bold(), uidata.cmdinput.input.as_str().into()]);
            frame.render_widget(Paragraph::new(line), area);
            let offset = (prompt.chars().count() + uidata.cmdinput.cursor_pos) as u16;
            frame.set_cursor_position((area.x + offset.min(area.width.saturating_sub(1)), area.y));
        } else {
            frame.render_widget(
                Paragraph::new(uidata.status_message.as_str()).style(Style::new().fg(Color::Gray)),
                area,
            );
        }
    }

    fn draw_popup(&self, popup: &MenuView, frame: &mut Frame) {
        let area = popup_area(frame.area(), 60, 70);
        let items: Vec<ListItem> = popup
            .lines
            .iter()
            .map(|l| ListItem::new(l.as_str()))
            .collect();
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(Line::from(format!(" {} ", popup.title)).centered())
                    .border_set(border::ROUNDED),
            )
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED));

        let selected = (popup.selected < popup.lines.len()).then_some(popup.selected);
        let mut state = ListState::default().with_selected(selected);
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}
