//! Protokoll der ausgeführten Commands.
//!
//! Jeder Command, den `AppController::handle_command` ausführt, landet hier.
//! Damit lässt sich nachvollziehen, welche Parameter-Änderungen und
//! Drag-Schritte zu einem Netz- oder Export-Zustand geführt haben; die
//! Integrationstests prüfen darüber die Intent→Command-Abbildung.

use super::AppCommand;

/// Ringpuffer-artiges Log der zuletzt ausgeführten Commands.
#[derive(Default)]
pub struct CommandLog {
    entries: Vec<AppCommand>,
}

impl CommandLog {
    /// Obergrenze; bei Überlauf fällt die ältere Hälfte weg.
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Hängt einen ausgeführten Command an.
    pub fn record(&mut self, command: AppCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        log::trace!("Command: {:?}", command);
        self.entries.push(command);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle Einträge, älteste zuerst.
    pub fn entries(&self) -> &[AppCommand] {
        &self.entries
    }

    /// Zuletzt ausgeführter Command.
    pub fn last(&self) -> Option<&AppCommand> {
        self.entries.last()
    }

    /// Nur die Drag-Commands (Oberfläche und Handles) in Ausführungsreihenfolge.
    pub fn gesture_trace(&self) -> impl Iterator<Item = &AppCommand> + '_ {
        self.entries.iter().filter(|command| is_gesture(command))
    }

    /// Anzahl protokollierter Export-Anforderungen.
    ///
    /// Weicht vom Export-Zähler der Parameter ab, wenn Anforderungen während
    /// eines laufenden Exports zusammengefasst wurden.
    pub fn export_requests(&self) -> usize {
        self.entries
            .iter()
            .filter(|command| matches!(command, AppCommand::RequestExport))
            .count()
    }
}

fn is_gesture(command: &AppCommand) -> bool {
    matches!(
        command,
        AppCommand::BeginSurfaceDrag { .. }
            | AppCommand::UpdateSurfaceDrag { .. }
            | AppCommand::EndSurfaceDrag { .. }
            | AppCommand::BeginHandleDrag { .. }
            | AppCommand::UpdateHandleDrag { .. }
            | AppCommand::EndHandleDrag { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = CommandLog::new();
        for _ in 0..CommandLog::MAX_ENTRIES + 10 {
            log.record(AppCommand::RequestExport);
        }
        assert!(log.len() <= CommandLog::MAX_ENTRIES);
        assert!(!log.is_empty());
        assert_eq!(log.export_requests(), log.len());
    }

    #[test]
    fn test_gesture_trace_skips_parameter_commands() {
        let mut log = CommandLog::new();
        log.record(AppCommand::SetWarpIntensity { value: 2.0 });
        log.record(AppCommand::EndHandleDrag {
            index: 1,
            pointer_id: 0,
        });
        log.record(AppCommand::RequestExport);

        let trace: Vec<_> = log.gesture_trace().collect();
        assert_eq!(trace.len(), 1);
        assert!(matches!(trace[0], AppCommand::EndHandleDrag { index: 1, .. }));
        assert!(matches!(log.last(), Some(AppCommand::RequestExport)));
        assert_eq!(log.export_requests(), 1);
    }
}
