use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, CallbackTrigger, Color, Font, FrameType},
    frame::Frame,
    group::Group,
    input::Input,
    menu::Choice,
    misc::Spinner,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use crate::app::controllers::control_panel::{ControlEvent, theme_options};
use crate::app::domain::color::HexColor;
use crate::app::domain::snapshot::{DEFAULT_BACKGROUND, FontSize};
use crate::app::domain::theme::CodeTheme;
use crate::app::messages::Message;
use crate::app::services::preview::{DOT_COLORS, DOT_GAP, DOT_SIZE, FILE_NAME_WIDTH, TITLE_PADDING};

use super::theme::{EXPORT_RED, PANEL_BG, PANEL_TEXT, WINDOW_BG, card_color, title_bar_color, to_fltk};

const WINDOW_W: i32 = 720;
const WINDOW_H: i32 = 590;

const CARD_X: i32 = 40;
const CARD_Y: i32 = 68;
const CARD_W: i32 = 640;
const CARD_H: i32 = 380;
const CARD_PAD: i32 = 32;
const TITLE_H: i32 = 36;
const CONTENT_PAD: i32 = 20;

pub struct MainWidgets {
    pub wind: Window,
    pub file_name_input: Input,
    pub content: Group,
    pub code_editor: TextEditor,
    pub source_buffer: TextBuffer,
    pub style_buffer: TextBuffer,
    pub theme_choice: Choice,
    pub font_size_spinner: Spinner,
    pub background_button: Button,
    pub background_input: Input,
    pub export_button: Button,
    pub status_frame: Frame,
}

/// Build the "Code Images" window: the preview card on top, the settings
/// panel below it. Every control reports through `sender`.
pub fn build_main_window(initial_source: &str, sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, WINDOW_W, WINDOW_H, "Code Images");
    wind.set_xclass("codeshot");
    wind.set_color(WINDOW_BG);

    let mut heading = Frame::default()
        .with_pos(0, 16)
        .with_size(WINDOW_W, 36)
        .with_label("Code Images");
    heading.set_label_font(Font::HelveticaBold);
    heading.set_label_size(24);
    heading.set_label_color(Color::White);

    let (file_name_input, content, code_editor, source_buffer, style_buffer) =
        build_card(initial_source, sender);

    let (theme_choice, font_size_spinner, background_button, background_input, export_button) =
        build_settings_panel(sender);

    let mut status_frame = Frame::default()
        .with_pos(CARD_X, CARD_Y + CARD_H + 100)
        .with_size(CARD_W, 24);
    status_frame.set_align(Align::Left | Align::Inside);
    status_frame.set_label_size(13);
    status_frame.set_label_color(PANEL_TEXT);

    wind.end();

    MainWidgets {
        wind,
        file_name_input,
        content,
        code_editor,
        source_buffer,
        style_buffer,
        theme_choice,
        font_size_spinner,
        background_button,
        background_input,
        export_button,
        status_frame,
    }
}

fn build_card(initial_source: &str, sender: &Sender<Message>) -> (Input, Group, TextEditor, TextBuffer, TextBuffer) {
    let mut card = Group::new(CARD_X, CARD_Y, CARD_W, CARD_H, None);
    card.set_frame(FrameType::RFlatBox);
    card.set_color(card_color());

    let inner_x = CARD_X + CARD_PAD;
    let inner_w = CARD_W - 2 * CARD_PAD;
    let title_y = CARD_Y + CARD_PAD;

    let mut title_bar = Frame::default()
        .with_pos(inner_x, title_y)
        .with_size(inner_w, TITLE_H);
    title_bar.set_frame(FrameType::RFlatBox);
    title_bar.set_color(title_bar_color());

    let dot = DOT_SIZE as i32;
    let dot_y = title_y + (TITLE_H - dot) / 2;
    for (i, color) in DOT_COLORS.iter().enumerate() {
        let x = inner_x + TITLE_PADDING as i32 + i as i32 * (dot + DOT_GAP as i32);
        let mut frame = Frame::default().with_pos(x, dot_y).with_size(dot, dot);
        frame.set_frame(FrameType::OvalBox);
        frame.set_color(to_fltk(*color));
    }

    let name_w = FILE_NAME_WIDTH as i32;
    let mut file_name_input = Input::default()
        .with_pos(file_name_x(inner_x, inner_w), title_y + 6)
        .with_size(name_w, TITLE_H - 12);
    file_name_input.set_frame(FrameType::FlatBox);
    file_name_input.set_color(title_bar_color());
    file_name_input.set_text_color(Color::White);
    file_name_input.set_text_size(16);
    file_name_input.set_trigger(CallbackTrigger::Changed);
    file_name_input.set_callback({
        let s = sender.clone();
        move |input| s.send(Message::Control(ControlEvent::FileNameEdited(input.value())))
    });

    let content_y = title_y + TITLE_H;
    let content_h = CARD_H - CARD_PAD * 2 - TITLE_H;
    let mut content = Group::new(inner_x, content_y, inner_w, content_h, None);
    content.set_frame(FrameType::RFlatBox);

    let mut source_buffer = TextBuffer::default();
    let mut style_buffer = TextBuffer::default();
    source_buffer.set_text(initial_source);
    style_buffer.set_text(&"A".repeat(initial_source.len()));

    let mut code_editor = TextEditor::new(
        inner_x + CONTENT_PAD,
        content_y + CONTENT_PAD,
        inner_w - 2 * CONTENT_PAD,
        content_h - 2 * CONTENT_PAD,
        None,
    );
    code_editor.set_frame(FrameType::RFlatBox);
    code_editor.set_buffer(source_buffer.clone());
    code_editor.set_text_font(Font::Courier);
    code_editor.set_text_size(FontSize::DEFAULT.px() as i32);
    code_editor.wrap_mode(WrapMode::None, 0);
    code_editor.set_scrollbar_size(8);

    content.end();
    card.end();

    // Keep the style buffer the same length as the text until the next
    // restyle; FLTK reads past the end otherwise.
    let mut style_buf = style_buffer.clone();
    let s = sender.clone();
    source_buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
        if inserted > 0 || deleted > 0 {
            if inserted > 0 {
                style_buf.insert(pos, &"A".repeat(inserted as usize));
            }
            if deleted > 0 {
                style_buf.remove(pos, pos + deleted);
            }
            s.send(Message::SourceBufferModified);
        }
    });

    (file_name_input, content, code_editor, source_buffer, style_buffer)
}

/// Left edge of the file-name input: flush right in the title bar, the
/// same place the exported card draws the name.
fn file_name_x(title_x: i32, title_w: i32) -> i32 {
    title_x + title_w - TITLE_PADDING as i32 - FILE_NAME_WIDTH as i32
}

fn build_settings_panel(sender: &Sender<Message>) -> (Choice, Spinner, Button, Input, Button) {
    let panel_y = CARD_Y + CARD_H + 20;
    let mut panel = Group::new(CARD_X, panel_y, CARD_W, 64, None);
    panel.set_frame(FrameType::RFlatBox);
    panel.set_color(PANEL_BG);

    let row_y = panel_y + 19;

    let mut theme_choice = Choice::default()
        .with_pos(CARD_X + 70, row_y)
        .with_size(120, 26)
        .with_label("Theme:");
    theme_choice.set_label_color(PANEL_TEXT);
    for option in theme_options() {
        theme_choice.add_choice(&option.label);
    }
    theme_choice.set_value(CodeTheme::default().index() as i32);
    theme_choice.set_callback({
        let s = sender.clone();
        move |choice| {
            let picked = usize::try_from(choice.value()).ok().and_then(CodeTheme::from_index);
            if let Some(theme) = picked {
                s.send(Message::Control(ControlEvent::ThemeSelected(theme)));
            }
        }
    });

    let mut font_size_spinner = Spinner::default()
        .with_pos(CARD_X + 260, row_y)
        .with_size(60, 26)
        .with_label("Font Size:");
    font_size_spinner.set_label_color(PANEL_TEXT);
    font_size_spinner.set_range(FontSize::MIN as f64, FontSize::MAX as f64);
    font_size_spinner.set_step(1.0);
    font_size_spinner.set_value(FontSize::DEFAULT.px() as f64);
    font_size_spinner.set_callback({
        let s = sender.clone();
        move |spinner| s.send(Message::Control(ControlEvent::FontSizeChanged(spinner.value())))
    });

    let mut background_button = Button::default()
        .with_pos(CARD_X + 410, row_y)
        .with_size(26, 26)
        .with_label("Background:");
    background_button.set_align(Align::Left);
    background_button.set_label_color(PANEL_TEXT);
    background_button.set_frame(FrameType::FlatBox);
    background_button.set_callback({
        let s = sender.clone();
        move |_| s.send(Message::PickBackground)
    });

    // Typed hex colors apply on Enter; anything unparsable turns red
    let mut background_input = Input::default()
        .with_pos(CARD_X + 440, row_y)
        .with_size(72, 26);
    background_input.set_value(&DEFAULT_BACKGROUND.to_string());
    background_input.set_trigger(CallbackTrigger::EnterKeyAlways);
    background_input.set_callback({
        let s = sender.clone();
        move |input| {
            match input.value().parse::<HexColor>() {
                Ok(color) => {
                    input.set_text_color(Color::Foreground);
                    s.send(Message::Control(ControlEvent::BackgroundPicked(color)));
                }
                Err(_) => input.set_text_color(EXPORT_RED),
            }
            input.redraw();
        }
    });

    let mut export_button = Button::default()
        .with_pos(CARD_X + CARD_W - 112, row_y)
        .with_size(100, 26)
        .with_label("Export Image");
    export_button.set_frame(FrameType::RFlatBox);
    export_button.set_color(EXPORT_RED);
    export_button.set_selection_color(Color::from_rgb(0xd9, 0x3a, 0x3a));
    export_button.set_label_color(Color::White);
    export_button.set_label_font(Font::HelveticaBold);
    export_button.set_callback({
        let s = sender.clone();
        move |_| s.send(Message::Control(ControlEvent::ExportClicked))
    });

    panel.end();

    (theme_choice, font_size_spinner, background_button, background_input, export_button)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::snapshot::SnapshotState;
    use crate::app::services::preview::compose;
    use crate::app::services::syntax::Highlighted;
    use crate::app::domain::color::Rgba;

    #[test]
    fn test_file_name_input_matches_exported_position() {
        let hl = Highlighted { lines: vec![Vec::new()], background: Rgba::WHITE, foreground: Rgba::WHITE };
        let scene = compose(&SnapshotState::default(), &hl);
        let title = scene.title_bar.rect;
        let name = scene.title_bar.file_name.rect;

        let x = file_name_x(title.x as i32, title.w as i32);
        assert_eq!(x, name.x as i32);
        assert_eq!(x + FILE_NAME_WIDTH as i32, name.right() as i32);

        // the on-screen title bar is wider than the empty card's
        let x = file_name_x(CARD_X + CARD_PAD, CARD_W - 2 * CARD_PAD);
        assert_eq!(x + FILE_NAME_WIDTH as i32 + TITLE_PADDING as i32, CARD_X + CARD_W - CARD_PAD);
    }
}
