/// Mate marker carried at the end of a read name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interleave {
    One,
    Two,
}

impl Interleave {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::One => "/1",
            Self::Two => "/2",
        }
    }

    fn detect(name: &str) -> Option<Self> {
        [Self::One, Self::Two]
            .into_iter()
            .find(|il| name.ends_with(il.suffix()))
    }
}

/// One FastQ record. Fields other than the name may be absent when the
/// record was truncated; validators decide what that means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRead {
    name: String,
    sequence: Option<String>,
    plusline: Option<String>,
    quality: Option<String>,
    interleave: Option<Interleave>,
}

impl FastqRead {
    pub fn new(name: &str, sequence: &str, plusline: &str, quality: &str) -> Self {
        Self::from_parts(
            name.to_string(),
            Some(sequence.to_string()),
            Some(plusline.to_string()),
            Some(quality.to_string()),
        )
    }

    /// Builds a read from a raw 4-line block. `None` if the name slot is absent.
    pub fn from_lines(lines: [Option<String>; 4]) -> Option<Self> {
        let [name, sequence, plusline, quality] = lines;
        Some(Self::from_parts(name?, sequence, plusline, quality))
    }

    fn from_parts(
        name: String,
        sequence: Option<String>,
        plusline: Option<String>,
        quality: Option<String>,
    ) -> Self {
        let mut name = name;
        let interleave = Interleave::detect(&name);
        if let Some(il) = interleave {
            name.truncate(name.len() - il.suffix().len());
        }
        Self {
            name,
            sequence,
            plusline,
            quality,
            interleave,
        }
    }

    /// Read name with any interleave suffix removed.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[inline]
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }
    #[inline]
    pub fn plusline(&self) -> Option<&str> {
        self.plusline.as_deref()
    }
    #[inline]
    pub fn quality(&self) -> Option<&str> {
        self.quality.as_deref()
    }
    #[inline]
    pub fn interleave(&self) -> Option<Interleave> {
        self.interleave
    }
}
