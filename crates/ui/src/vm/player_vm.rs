use signcode_core::{LessonPlayer, PlaybackState};

/// One row of the lesson list beside the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonItemVm {
    pub index: usize,
    pub title: String,
    pub duration: String,
    pub is_current: bool,
    pub is_completed: bool,
}

/// UI-ready snapshot of a `LessonPlayer`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerVm {
    pub course_title: String,
    pub lesson_title: String,
    pub media: String,
    pub transcript: Option<String>,
    pub position_label: String,
    pub progress_percent: u8,
    pub progress_label: String,
    pub state_label: &'static str,
    pub play_label: &'static str,
    pub is_playing: bool,
    pub is_muted: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub current_completed: bool,
    pub lessons: Vec<LessonItemVm>,
}

/// `None` until a course is loaded.
#[must_use]
pub fn map_player(player: &LessonPlayer) -> Option<PlayerVm> {
    let course = player.course()?;
    let progress = player.progress();
    let current = player.current_lesson();

    let lessons = course
        .lessons()
        .iter()
        .enumerate()
        .map(|(index, lesson)| LessonItemVm {
            index,
            title: lesson.title().to_owned(),
            duration: lesson.duration().to_owned(),
            is_current: index == player.index(),
            is_completed: player.is_completed(lesson.id()),
        })
        .collect();

    let position_label = if course.lesson_count() == 0 {
        "No lessons yet".to_owned()
    } else {
        format!("Lesson {} of {}", player.index() + 1, course.lesson_count())
    };

    Some(PlayerVm {
        course_title: course.title().to_owned(),
        lesson_title: current.map(|l| l.title().to_owned()).unwrap_or_default(),
        media: current.map(|l| l.media().to_owned()).unwrap_or_default(),
        transcript: current
            .filter(|l| player.transcript_visible() && l.has_transcript())
            .map(|l| l.transcript().to_owned()),
        position_label,
        progress_percent: progress.percent_floor(),
        progress_label: format!(
            "{} of {} complete ({}%)",
            progress.completed(),
            progress.total(),
            progress.percent_floor()
        ),
        state_label: state_label(player.state()),
        play_label: if player.is_playing() { "Pause" } else { "Play" },
        is_playing: player.is_playing(),
        is_muted: player.is_muted(),
        has_previous: player.has_previous(),
        has_next: player.has_next(),
        current_completed: current.is_some_and(|l| player.is_completed(l.id())),
        lessons,
    })
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Not started",
        PlaybackState::Ready => "Ready",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}
