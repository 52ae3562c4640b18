//! Image lightbox state: which project gallery is open and which image is
//! showing. Independent of section navigation.

use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightboxView {
    pub project: String,
    pub image: usize,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxKey {
    Close,
    Previous,
    Next,
}

impl LightboxKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(LightboxKey::Close),
            "ArrowLeft" => Some(LightboxKey::Previous),
            "ArrowRight" => Some(LightboxKey::Next),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Lightbox {
    galleries: BTreeMap<String, usize>,
    open: Option<(String, usize)>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or resizes) a project gallery. Empty galleries are dropped
    /// and close the lightbox if it was showing them.
    pub fn register(&mut self, project: &str, image_count: usize) {
        if image_count == 0 {
            self.galleries.remove(project);
            if self.open_project() == Some(project) {
                self.open = None;
            }
            return;
        }
        self.galleries.insert(project.to_string(), image_count);
        if let Some((open_project, image)) = self.open.as_mut() {
            if open_project == project && *image >= image_count {
                *image = image_count - 1;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_project(&self) -> Option<&str> {
        self.open.as_ref().map(|(project, _)| project.as_str())
    }

    pub fn view(&self) -> Option<LightboxView> {
        let (project, image) = self.open.as_ref()?;
        let count = *self.galleries.get(project)?;
        Some(LightboxView {
            project: project.clone(),
            image: *image,
            count,
        })
    }

    /// Opens `project` at `image`. Unknown projects and out-of-range images
    /// are ignored.
    pub fn open(&mut self, project: &str, image: usize) -> bool {
        match self.galleries.get(project) {
            Some(&count) if image < count => {
                self.open = Some((project.to_string(), image));
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let Some((project, image)) = self.open.as_mut() else {
            return false;
        };
        let Some(&count) = self.galleries.get(project.as_str()) else {
            return false;
        };
        let count = count as isize;
        *image = ((*image as isize + delta).rem_euclid(count)) as usize;
        true
    }

    /// Keyboard handling while open. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.is_active() {
            return false;
        }
        match LightboxKey::from_key(key) {
            Some(LightboxKey::Close) => self.close(),
            Some(LightboxKey::Previous) => self.previous(),
            Some(LightboxKey::Next) => self.next(),
            None => false,
        }
    }
}
