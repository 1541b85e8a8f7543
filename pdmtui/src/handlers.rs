//! Keyboard event handlers.

use crate::app::App;
use crate::state::PanelInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Runtime;

/// Handle a key event, returns true if the app should exit.
pub fn handle_key(app: &mut App, key: KeyEvent, runtime: &Runtime) -> bool {
    match &mut app.input {
        PanelInput::Normal => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('r') => app.refresh_status(runtime),
            KeyCode::Char('t') => {
                app.input = PanelInput::TempBasal {
                    buffer: String::new(),
                };
            }
            KeyCode::Char('b') => {
                app.input = PanelInput::Bolus {
                    buffer: String::new(),
                };
            }
            KeyCode::Char('c') => app.cancel_bolus(runtime),
            KeyCode::Char('x') => app.cancel_temp_basal(runtime),
            _ => {}
        },
        PanelInput::TempBasal { buffer } => match key.code {
            KeyCode::Esc => app.input = PanelInput::Normal,
            KeyCode::Enter => {
                let input = buffer.clone();
                app.submit_temp_basal(&input, runtime);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    buffer.push(c);
                }
            }
            _ => {}
        },
        PanelInput::Bolus { buffer } => match key.code {
            KeyCode::Esc => app.input = PanelInput::Normal,
            KeyCode::Enter => {
                let input = buffer.clone();
                app.submit_bolus(&input, runtime);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    buffer.push(c);
                }
            }
            _ => {}
        },
    }
    false
}
