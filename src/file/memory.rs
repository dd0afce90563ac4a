use super::Backend;

/// Input file backed by Memory
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a new memory backend
    ///
    /// ## Arguments
    /// * 'data' - The data buffer to consume
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory() {
        let memory = Memory::new(b"tiny\t2\t0\tnamed\tofficial\n".to_vec());

        assert_eq!(memory.len(), 24);
        assert_eq!(&memory.data()[..4], b"tiny");
        assert_eq!(memory.data()[23], b'\n');
    }

    #[test]
    fn memory_empty_buffer() {
        let memory = Memory::new(vec![]);

        assert_eq!(memory.len(), 0);
        assert!(memory.data().is_empty());
    }
}
