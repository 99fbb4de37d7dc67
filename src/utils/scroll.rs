use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wraps `text` to `width` terminal columns. Words longer than a line
/// are broken at character boundaries. Every input line yields at least one
/// output line, so blank lines survive.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut out = Vec::new();
    for raw_line in text.split('\n') {
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in raw_line.split(' ') {
            let word_width = UnicodeWidthStr::width(word);
            let separator = usize::from(!current.is_empty());

            if current_width + separator + word_width <= width {
                if separator == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += separator + word_width;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        out.push(current);
    }
    out
}

/// The widest suffix of `input` that fits in `width` columns.
pub fn visible_tail(input: &str, width: usize) -> &str {
    let mut used = 0usize;
    let mut start = input.len();
    for (index, ch) in input.char_indices().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        start = index;
    }
    &input[start..]
}

/// Scroll position measured from the bottom of the transcript, so new
/// messages stay in view unless the user has scrolled up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset_from_bottom: usize,
}

impl ScrollState {
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    pub fn follow_tail(&mut self) {
        self.offset_from_bottom = 0;
    }

    pub fn is_following_tail(&self) -> bool {
        self.offset_from_bottom == 0
    }

    /// Index of the first visible line for a transcript of `total_lines`
    /// shown in `viewport_height` rows. Clamps the stored offset so scrolling
    /// back down responds immediately.
    pub fn top_line(&mut self, total_lines: usize, viewport_height: usize) -> usize {
        let max_offset = total_lines.saturating_sub(viewport_height);
        self.offset_from_bottom = self.offset_from_bottom.min(max_offset);
        max_offset - self.offset_from_bottom
    }
}
