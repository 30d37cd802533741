mod infinite_scroll;
