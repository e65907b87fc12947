mod triangulation;
